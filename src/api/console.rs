//! Console presentation layer: stdin drives the timer, stdout shows it

use std::io::BufRead;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::state::{Direction, TimerSnapshot, TimerStatus};
use super::commands::{ConsoleInput, HELP};
use crate::tasks::TimerCommand;

const RED: &str = "\x1b[1;37;41m";
const RESET: &str = "\x1b[0m";

/// One display line for a snapshot; the finished state is drawn red
pub fn render_snapshot(snapshot: &TimerSnapshot, color: bool) -> String {
    let arrow = match snapshot.direction {
        Direction::CountDown => "down",
        Direction::CountUp => "up",
    };
    let status = match snapshot.status {
        TimerStatus::Idle => "idle",
        TimerStatus::Running => "running",
        TimerStatus::Paused => "paused",
        TimerStatus::Finished => "finished",
    };
    let line = format!("{:>10}  [{}] counting {}", snapshot.display, status, arrow);

    if snapshot.finished && color {
        format!("{}{}{}", RED, line, RESET)
    } else {
        line
    }
}

/// Lines to print when the published snapshot moves from `previous` to `current`
pub fn describe_change(
    previous: Option<&TimerSnapshot>,
    current: &TimerSnapshot,
    color: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    let redraw = previous.map_or(true, |p| {
        p.display != current.display || p.status != current.status || p.direction != current.direction
    });
    if redraw {
        lines.push(render_snapshot(current, color));
    }

    let rejected_again = current.last_action.as_deref() == Some("start-rejected")
        && previous.map_or(true, |p| p.last_action_time != current.last_action_time);
    if let Some(error) = &current.last_error {
        if rejected_again || previous.map_or(true, |p| p.last_error.as_ref() != Some(error)) {
            lines.push(format!("cannot start: {}", error));
        }
    }

    match (previous.and_then(|p| p.output_error.as_ref()), &current.output_error) {
        (None, Some(error)) => lines.push(format!("output file not updated: {}", error)),
        (Some(_), None) => lines.push("output file updated again".to_string()),
        _ => {}
    }

    lines
}

/// Forward stdin lines from a detached thread, so a pending read never
/// holds up runtime shutdown
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read console input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Read commands from stdin and echo timer changes until `quit`, end of
/// input, or the timer task going away
pub async fn console_task(
    commands: mpsc::Sender<TimerCommand>,
    mut updates: watch::Receiver<TimerSnapshot>,
    color: bool,
) {
    let mut lines = spawn_stdin_reader();
    let mut shown = updates.borrow_and_update().clone();
    for line in describe_change(None, &shown, color) {
        println!("{}", line);
    }
    println!("type `help` for commands");

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    info!("Console input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<ConsoleInput>() {
                    Ok(ConsoleInput::Timer(command)) => {
                        debug!("Console command: {:?}", command);
                        if commands.send(command).await.is_err() {
                            warn!("Timer task is gone, closing console");
                            break;
                        }
                    }
                    Ok(ConsoleInput::Status) => match serde_json::to_string_pretty(&*updates.borrow()) {
                        Ok(json) => println!("{}", json),
                        Err(e) => warn!("Failed to serialize timer status: {}", e),
                    },
                    Ok(ConsoleInput::Help) => println!("{}", HELP),
                    Ok(ConsoleInput::Quit) => break,
                    Err(message) => {
                        warn!("Rejected console input: {}", message);
                        println!("{}", message);
                    }
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = updates.borrow_and_update().clone();
                for line in describe_change(Some(&shown), &current, color) {
                    println!("{}", line);
                }
                shown = current;
            }
        }
    }
}
