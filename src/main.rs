//! Simple Timer - console countdown/count-up timer
//!
//! This is the main entry point for the simple-timer application.

use tokio::sync::{mpsc, watch};
use tracing::info;

use simple_timer::{
    api::console_task,
    config::Config,
    services::OutputFile,
    state::{TimerEngine, TimerInputs},
    tasks::{timer_task, DeadlineScheduler},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout belongs to the timer display
    tracing_subscriber::fmt()
        .with_env_filter(format!("simple_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting simple-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: output={}, default_time={}, reverse={}",
        config.output.display(),
        config.default_time,
        config.reverse
    );

    let inputs = TimerInputs {
        default_time: config.default_time.clone(),
        reverse: config.reverse,
    };
    let engine = TimerEngine::new(inputs, DeadlineScheduler::new(), OutputFile::new(&config.output));

    let (command_tx, command_rx) = mpsc::channel(32);
    let (update_tx, update_rx) = watch::channel(engine.snapshot());

    let timer = tokio::spawn(timer_task(engine, command_rx, update_tx));

    tokio::select! {
        _ = console_task(command_tx, update_rx, !config.no_color) => {
            info!("Console closed");
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // The console owned the only command sender, so the timer task winds down
    timer.await?;

    info!("Timer shutdown complete");
    Ok(())
}
