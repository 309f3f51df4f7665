//! Presentation layer module
//!
//! A line-oriented console that translates input into timer commands and
//! renders published snapshots.

pub mod commands;
pub mod console;

pub use commands::ConsoleInput;
pub use console::{console_task, render_snapshot};
