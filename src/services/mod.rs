//! External side effects of the timer
//!
//! Currently only the output file that mirrors the displayed time.

pub mod output_file;

// Re-export main types
pub use output_file::{OutputFile, OutputSink};
