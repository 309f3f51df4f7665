//! Simple Timer - a countdown/count-up timer that mirrors its value to a file
//!
//! The engine in [`state`] holds the single timer and is driven by the
//! one-second tick source in [`tasks`]. The console in [`api`] is one possible
//! presentation layer; other processes can follow the timer through the
//! output file written by [`services`].

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{TimerEngine, TimerInputs, TimerSnapshot};
pub use tasks::{timer_task, TimerCommand};
pub use utils::signals::shutdown_signal;
