//! Utility functions module
//!
//! Time text conversions and process signal handling.

pub mod signals;
pub mod time_format;

// Re-export main functions
pub use signals::shutdown_signal;
pub use time_format::{parse_time, render};
