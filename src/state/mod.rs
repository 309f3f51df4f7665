//! State management module
//!
//! The timer's data model and the engine that mutates it.

pub mod timer_engine;
pub mod timer_state;

// Re-export main types
pub use timer_engine::{TimerEngine, TimerInputs};
pub use timer_state::{Direction, TimerSnapshot, TimerState, TimerStatus};
