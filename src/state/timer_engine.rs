//! The timer engine: every operation the presentation layer and the tick
//! source can perform on the single timer

use std::time::Duration;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::{
    error::TimerError,
    services::OutputSink,
    tasks::TickScheduler,
    utils::{parse_time, render},
};
use super::{Direction, TimerSnapshot, TimerState, TimerStatus};

/// Cadence of the tick source
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Presentation-layer fields that are only sampled by `start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerInputs {
    /// `[[H:]M:]S` text of the default-time field
    pub default_time: String,
    /// Count up instead of down
    pub reverse: bool,
}

impl Default for TimerInputs {
    fn default() -> Self {
        Self {
            default_time: "00:00:00".to_string(),
            reverse: false,
        }
    }
}

/// Owns the timer state and applies operations to it sequentially
#[derive(Debug)]
pub struct TimerEngine<S, O> {
    state: TimerState,
    inputs: TimerInputs,
    scheduler: S,
    output: O,
    last_error: Option<String>,
    output_error: Option<String>,
    last_action: Option<String>,
    last_action_time: Option<DateTime<Utc>>,
}

impl<S: TickScheduler, O: OutputSink> TimerEngine<S, O> {
    /// Create an idle engine at zero
    pub fn new(inputs: TimerInputs, scheduler: S, output: O) -> Self {
        Self {
            state: TimerState::new(),
            inputs,
            scheduler,
            output,
            last_error: None,
            output_error: None,
            last_action: None,
            last_action_time: None,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn inputs(&self) -> &TimerInputs {
        &self.inputs
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Replace the default-time text. Takes effect on the next `start`.
    pub fn set_default_time(&mut self, text: impl Into<String>) {
        self.inputs.default_time = text.into();
        debug!("Default time set to {:?}", self.inputs.default_time);
    }

    /// Set the reverse toggle. An active run keeps its direction.
    pub fn set_reverse(&mut self, reverse: bool) {
        self.inputs.reverse = reverse;
        debug!("Reverse set to {}", reverse);
    }

    /// Begin or resume a run
    ///
    /// Direction and target are re-read from the inputs every time. On a
    /// malformed default time nothing changes apart from `last_error`.
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.state.is_running() {
            debug!("Start ignored, timer already running");
            return Ok(());
        }

        let direction = Direction::from_reverse(self.inputs.reverse);
        let target = match parse_time(&self.inputs.default_time) {
            Ok(target) => target,
            Err(e) => {
                error!("Refusing to start: {}", e);
                self.last_error = Some(e.to_string());
                self.record("start-rejected");
                return Err(e);
            }
        };

        self.last_error = None;
        self.state.direction = direction;
        self.state.target_seconds = target;
        if direction == Direction::CountDown {
            self.state.current_seconds = target;
        }
        self.state.status = TimerStatus::Running;

        info!(
            "Timer started: {:?} from {} with target {}",
            direction,
            self.display(),
            render(target)
        );
        self.record("start");
        self.persist();
        self.scheduler.schedule(TICK_INTERVAL);
        Ok(())
    }

    /// Suspend the run, keeping the current value
    pub fn pause(&mut self) {
        if !self.state.is_running() {
            debug!("Pause ignored, timer not running");
            return;
        }

        self.scheduler.cancel();
        self.state.status = TimerStatus::Paused;
        info!("Timer paused at {}", self.display());
        self.record("pause");
    }

    /// Halt any run and reset to zero
    pub fn stop(&mut self) {
        if self.state.is_running() {
            self.scheduler.cancel();
        }

        self.state.status = TimerStatus::Idle;
        self.state.current_seconds = 0;
        info!("Timer stopped");
        self.record("stop");
        self.persist();
    }

    /// Apply a manual offset in seconds
    ///
    /// Removing an hour or a minute that is not there is rejected outright;
    /// anything else is applied and clamped at zero. Returns whether the
    /// adjustment was applied.
    pub fn adjust_time(&mut self, delta: i64) -> bool {
        let current = self.state.current_seconds;
        let missing_hour = delta == -3600 && current < 3600;
        let missing_minute = (delta == -3600 || delta == -60) && current < 60;
        if missing_hour || missing_minute {
            debug!("Adjustment {} rejected at {}", delta, self.display());
            return false;
        }

        self.state.current_seconds = current.saturating_add(delta).max(0);
        debug!("Adjusted by {} to {}", delta, self.display());
        self.record("adjust");
        self.persist();
        true
    }

    /// Advance one second; invoked by the tick source when the pending tick is due
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            debug!("Tick ignored, timer not running");
            self.scheduler.cancel();
            return;
        }

        if !self.state.can_advance() {
            self.finish();
            return;
        }

        self.state.advance();
        debug!("Tick: {}", self.display());
        self.persist();

        if self.state.can_advance() {
            self.scheduler.schedule(TICK_INTERVAL);
        } else {
            self.finish();
        }
    }

    /// Rendered current value, as shown and persisted
    pub fn display(&self) -> String {
        render(self.state.current_seconds)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            display: self.display(),
            current_seconds: self.state.current_seconds,
            target_seconds: self.state.target_seconds,
            status: self.state.status,
            direction: self.state.direction,
            finished: self.state.is_finished(),
            default_time: self.inputs.default_time.clone(),
            reverse: self.inputs.reverse,
            last_error: self.last_error.clone(),
            output_error: self.output_error.clone(),
            last_action: self.last_action.clone(),
            last_action_time: self.last_action_time,
        }
    }

    fn finish(&mut self) {
        self.scheduler.cancel();
        self.state.status = TimerStatus::Finished;
        info!("Timer finished at {}", self.display());
        self.record("finished");
    }

    fn record(&mut self, action: &str) {
        self.last_action = Some(action.to_string());
        self.last_action_time = Some(Utc::now());
    }

    /// Write the display to the output; failures are reported once per streak
    fn persist(&mut self) {
        match self.output.write(&self.display()) {
            Ok(()) => {
                if self.output_error.take().is_some() {
                    info!("Timer output writable again");
                }
            }
            Err(e) => {
                if self.output_error.is_none() {
                    warn!("Failed to persist timer output: {:?}", e);
                    self.output_error = Some(e.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::output_file::RecordingOutput, tasks::ManualScheduler};
    use pretty_assertions::assert_eq;

    type TestEngine = TimerEngine<ManualScheduler, RecordingOutput>;

    fn engine(default_time: &str, reverse: bool) -> (TestEngine, RecordingOutput) {
        let output = RecordingOutput::default();
        let inputs = TimerInputs {
            default_time: default_time.to_string(),
            reverse,
        };
        (TimerEngine::new(inputs, ManualScheduler::new(), output.clone()), output)
    }

    /// Fire the pending tick the way the tick source would
    fn fire(engine: &mut TestEngine) -> bool {
        if engine.scheduler().is_pending() {
            engine.tick();
            true
        } else {
            false
        }
    }

    fn at(seconds: i64) -> (TestEngine, RecordingOutput) {
        let (mut engine, output) = engine("0", false);
        engine.adjust_time(seconds);
        (engine, output)
    }

    #[test]
    fn countdown_from_ten_finishes_at_zero() {
        let (mut engine, output) = engine("00:00:10", false);
        engine.start().unwrap();
        assert_eq!(engine.state().current_seconds, 10);
        assert_eq!(engine.scheduler().pending(), Some(TICK_INTERVAL));

        let mut ticks = 0;
        while fire(&mut engine) {
            ticks += 1;
        }

        assert_eq!(ticks, 10);
        assert_eq!(engine.state().current_seconds, 0);
        assert_eq!(engine.state().status, TimerStatus::Finished);
        assert!(!engine.state().is_running());
        assert_eq!(output.last().as_deref(), Some("0:00"));
    }

    #[test]
    fn count_up_to_five_finishes_at_target() {
        let (mut engine, output) = engine("00:00:05", true);
        engine.start().unwrap();
        assert_eq!(engine.state().current_seconds, 0);
        assert_eq!(engine.state().direction, Direction::CountUp);

        let mut ticks = 0;
        while fire(&mut engine) {
            ticks += 1;
        }

        assert_eq!(ticks, 5);
        assert_eq!(engine.state().current_seconds, 5);
        assert_eq!(engine.state().target_seconds, 5);
        assert!(engine.snapshot().finished);
        assert_eq!(output.last().as_deref(), Some("0:05"));
    }

    #[test]
    fn start_renders_parsed_target() {
        let (mut engine, output) = engine("1:30:05", false);
        engine.start().unwrap();
        assert_eq!(engine.state().target_seconds, 5405);
        assert_eq!(engine.display(), "1:30:05");
        assert_eq!(output.last().as_deref(), Some("1:30:05"));

        let (mut engine, _) = self::engine("5:09", false);
        engine.start().unwrap();
        assert_eq!(engine.state().target_seconds, 309);
        assert_eq!(engine.display(), "5:09");
    }

    #[test]
    fn start_with_zero_target_finishes_on_first_tick() {
        let (mut engine, _) = engine("0", false);
        engine.start().unwrap();
        assert!(fire(&mut engine));
        assert_eq!(engine.state().status, TimerStatus::Finished);
        assert!(!fire(&mut engine));
    }

    #[test]
    fn malformed_default_time_leaves_timer_stopped() {
        let (mut engine, output) = engine("ten minutes", false);
        let err = engine.start().unwrap_err();

        assert!(matches!(err, TimerError::Format { .. }));
        assert!(!engine.state().is_running());
        assert_eq!(engine.state().status, TimerStatus::Idle);
        assert!(!engine.scheduler().is_pending());
        assert_eq!(output.count(), 0);
        assert!(engine.snapshot().last_error.is_some());

        engine.set_default_time("10:00");
        engine.start().unwrap();
        assert_eq!(engine.snapshot().last_error, None);
        assert_eq!(engine.state().current_seconds, 600);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let (mut engine, _) = engine("0:10", false);
        engine.start().unwrap();
        fire(&mut engine);
        engine.set_default_time("5:00");
        engine.start().unwrap();

        assert_eq!(engine.state().current_seconds, 9);
        assert_eq!(engine.scheduler().scheduled_count(), 2);
    }

    #[test]
    fn pause_keeps_value_and_cancels_tick() {
        let (mut engine, _) = engine("0:10", false);
        engine.start().unwrap();
        fire(&mut engine);
        fire(&mut engine);
        engine.pause();

        assert_eq!(engine.state().status, TimerStatus::Paused);
        assert_eq!(engine.state().current_seconds, 8);
        assert!(!engine.scheduler().is_pending());

        engine.tick();
        assert_eq!(engine.state().current_seconds, 8);
    }

    #[test]
    fn pause_when_idle_is_a_no_op() {
        let (mut engine, _) = engine("0:10", false);
        engine.pause();
        assert_eq!(engine.state().status, TimerStatus::Idle);
        assert_eq!(engine.snapshot().last_action, None);
    }

    #[test]
    fn resume_rereads_target_and_direction() {
        let (mut engine, _) = engine("0:10", false);
        engine.start().unwrap();
        fire(&mut engine);
        engine.pause();

        engine.set_reverse(true);
        engine.set_default_time("0:12");
        engine.start().unwrap();

        assert_eq!(engine.state().direction, Direction::CountUp);
        assert_eq!(engine.state().target_seconds, 12);
        assert_eq!(engine.state().current_seconds, 9);
        fire(&mut engine);
        assert_eq!(engine.state().current_seconds, 10);
    }

    #[test]
    fn toggling_reverse_mid_run_keeps_direction() {
        let (mut engine, _) = engine("0:03", false);
        engine.start().unwrap();
        engine.set_reverse(true);
        fire(&mut engine);

        assert_eq!(engine.state().direction, Direction::CountDown);
        assert_eq!(engine.state().current_seconds, 2);
        assert!(engine.snapshot().reverse);
    }

    #[test]
    fn stop_resets_and_persists_zero() {
        let (mut engine, output) = engine("1:00:00", false);
        engine.start().unwrap();
        fire(&mut engine);
        engine.stop();

        assert_eq!(engine.state().current_seconds, 0);
        assert_eq!(engine.state().status, TimerStatus::Idle);
        assert!(!engine.scheduler().is_pending());
        assert_eq!(output.last().as_deref(), Some("0:00"));
    }

    #[test]
    fn stop_from_paused_and_finished() {
        let (mut engine, output) = engine("0:02", true);
        engine.start().unwrap();
        while fire(&mut engine) {}
        assert!(engine.state().is_finished());

        engine.stop();
        assert_eq!(engine.state().status, TimerStatus::Idle);
        assert_eq!(output.last().as_deref(), Some("0:00"));

        engine.start().unwrap();
        engine.pause();
        engine.stop();
        assert_eq!(engine.state().current_seconds, 0);
    }

    #[test]
    fn adjust_minus_minute_rejected_below_sixty() {
        let (mut engine, output) = at(45);
        let writes = output.count();

        assert!(!engine.adjust_time(-60));
        assert_eq!(engine.state().current_seconds, 45);
        assert_eq!(output.count(), writes);
    }

    #[test]
    fn adjust_minus_hour_rejected_below_an_hour() {
        let (mut engine, _) = at(3599);
        assert!(!engine.adjust_time(-3600));
        assert_eq!(engine.state().current_seconds, 3599);

        let (mut engine, _) = at(30);
        assert!(!engine.adjust_time(-3600));
        assert_eq!(engine.state().current_seconds, 30);
    }

    #[test]
    fn adjust_minus_hour_accepted_with_an_hour() {
        let (mut engine, output) = at(3700);
        assert!(engine.adjust_time(-3600));
        assert_eq!(engine.state().current_seconds, 100);
        assert_eq!(engine.display(), "1:40");
        assert_eq!(output.last().as_deref(), Some("1:40"));
    }

    #[test]
    fn adjust_clamps_at_zero() {
        let (mut engine, output) = at(0);
        assert!(engine.adjust_time(-1));
        assert_eq!(engine.state().current_seconds, 0);
        assert_eq!(output.last().as_deref(), Some("0:00"));

        let (mut engine, _) = at(70);
        assert!(engine.adjust_time(-100));
        assert_eq!(engine.state().current_seconds, 0);
    }

    #[test]
    fn adjust_zero_rewrites_same_value() {
        let (mut engine, output) = at(125);
        let before = engine.display();
        let writes = output.count();

        assert!(engine.adjust_time(0));
        assert_eq!(engine.state().current_seconds, 125);
        assert_eq!(engine.display(), before);
        assert_eq!(output.count(), writes + 1);
        assert_eq!(output.last(), Some(before));
    }

    #[test]
    fn countdown_never_goes_negative() {
        let (mut engine, _) = engine("0:03", false);
        engine.start().unwrap();
        let deltas = [-1, -60, -3600, -1, 1, -1, -1, -1, 60, -3600, -1];
        for delta in deltas {
            engine.adjust_time(delta);
            assert!(engine.state().current_seconds >= 0);
            fire(&mut engine);
            assert!(engine.state().current_seconds >= 0);
        }
    }

    #[test]
    fn adjust_while_running_extends_countdown() {
        let (mut engine, _) = engine("0:02", false);
        engine.start().unwrap();
        engine.adjust_time(60);
        assert_eq!(engine.display(), "1:02");
        fire(&mut engine);
        assert_eq!(engine.display(), "1:01");
    }

    #[test]
    fn output_failure_reported_once_and_cleared() {
        let (mut engine, output) = engine("0:05", false);
        output.set_failing(true);
        engine.start().unwrap();
        let first = engine.snapshot().output_error;
        assert!(first.is_some());

        fire(&mut engine);
        assert_eq!(engine.snapshot().output_error, first);
        assert_eq!(engine.display(), "0:04");

        output.set_failing(false);
        fire(&mut engine);
        assert_eq!(engine.snapshot().output_error, None);
        assert_eq!(output.last().as_deref(), Some("0:03"));
    }
}
