//! Timer state structure and the snapshot published to the presentation layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a run, fixed when the run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    CountDown,
    CountUp,
}

impl Direction {
    /// Map the reverse toggle onto a direction
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse { Self::CountUp } else { Self::CountDown }
    }

    fn step(self) -> i64 {
        match self {
            Self::CountDown => -1,
            Self::CountUp => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    /// The run's continuation condition failed. Behaves like `Paused`.
    Finished,
}

/// The single timer instance
#[derive(Debug, Clone)]
pub struct TimerState {
    pub current_seconds: i64,
    pub target_seconds: i64,
    pub direction: Direction,
    pub status: TimerStatus,
}

impl TimerState {
    /// Create an idle timer at zero
    pub fn new() -> Self {
        Self {
            current_seconds: 0,
            target_seconds: 0,
            direction: Direction::CountDown,
            status: TimerStatus::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == TimerStatus::Finished
    }

    /// Whether the current run may advance by another second
    pub fn can_advance(&self) -> bool {
        match self.direction {
            Direction::CountUp => self.current_seconds < self.target_seconds,
            Direction::CountDown => self.current_seconds > 0,
        }
    }

    /// Move one second in the run's direction
    pub fn advance(&mut self) {
        self.current_seconds += self.direction.step();
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the presentation layer needs to draw the timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub display: String,
    pub current_seconds: i64,
    pub target_seconds: i64,
    pub status: TimerStatus,
    pub direction: Direction,
    pub finished: bool,
    pub default_time: String,
    pub reverse: bool,
    /// Message from the last rejected `start`
    pub last_error: Option<String>,
    /// Set while writes to the output file are failing
    pub output_error: Option<String>,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}
