//! Background tasks module
//!
//! The tick scheduler abstraction and the task that drives the engine.

pub mod tick_scheduler;
pub mod timer_task;

// Re-export main types and functions
pub use tick_scheduler::{DeadlineScheduler, ManualScheduler, TickScheduler};
pub use timer_task::{timer_task, TimerCommand};
