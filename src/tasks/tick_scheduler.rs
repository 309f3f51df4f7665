//! Cancellable deferred tick used by the engine for its one-second cadence

use std::time::Duration;
use tokio::time::Instant;

/// Holds at most one pending tick
pub trait TickScheduler {
    /// Arrange for a tick after `delay`, replacing any pending one
    fn schedule(&mut self, delay: Duration);

    /// Drop the pending tick, if any
    fn cancel(&mut self);

    fn is_pending(&self) -> bool;
}

/// Scheduler backed by a tokio deadline; the timer task sleeps until it
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    deadline: Option<Instant>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl TickScheduler for DeadlineScheduler {
    fn schedule(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Scheduler with no clock. The caller decides when a pending tick is due,
/// which makes the engine fully synchronous.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<Duration>,
    scheduled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay of the pending tick
    pub fn pending(&self) -> Option<Duration> {
        self.pending
    }

    /// Total number of ticks ever scheduled
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) {
        self.pending = Some(delay);
        self.scheduled += 1;
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
