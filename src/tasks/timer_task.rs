//! Timer task: the single actor that owns the engine

use tokio::{
    sync::{mpsc, watch},
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

use crate::{
    services::OutputSink,
    state::{TimerEngine, TimerSnapshot},
};
use super::{DeadlineScheduler, TickScheduler};

/// Operations forwarded from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Pause,
    Stop,
    Adjust(i64),
    SetDefaultTime(String),
    SetReverse(bool),
    ToggleReverse,
}

impl<S: TickScheduler, O: OutputSink> TimerEngine<S, O> {
    /// Apply one command from the presentation layer
    pub fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Start => {
                // Rejection is already recorded in the snapshot
                let _ = self.start();
            }
            TimerCommand::Pause => self.pause(),
            TimerCommand::Stop => self.stop(),
            TimerCommand::Adjust(delta) => {
                self.adjust_time(delta);
            }
            TimerCommand::SetDefaultTime(text) => self.set_default_time(text),
            TimerCommand::SetReverse(reverse) => self.set_reverse(reverse),
            TimerCommand::ToggleReverse => {
                let reverse = !self.inputs().reverse;
                self.set_reverse(reverse);
            }
        }
    }
}

/// Run the engine until every command sender is dropped
///
/// Commands and due ticks are handled in this one task, so a tick cancelled
/// by `pause` or `stop` can never run. A snapshot is published after each.
pub async fn timer_task<O: OutputSink>(
    mut engine: TimerEngine<DeadlineScheduler, O>,
    mut commands: mpsc::Receiver<TimerCommand>,
    updates: watch::Sender<TimerSnapshot>,
) {
    info!("Starting timer task");
    updates.send_replace(engine.snapshot());

    loop {
        let deadline = engine.scheduler().deadline();

        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => {
                    debug!("Timer task received command: {:?}", command);
                    engine.apply(command);
                }
                None => break,
            },

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                engine.tick();
            }
        }

        updates.send_replace(engine.snapshot());
    }

    info!("Timer task stopped at {}", engine.display());
}
