//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "simple-timer")]
#[command(about = "A countdown/count-up timer that mirrors its value to a text file")]
#[command(version)]
pub struct Config {
    /// File overwritten with the rendered time on every change
    #[arg(short, long, default_value = "timer_output.txt")]
    pub output: PathBuf,

    /// Initial default time, `[[H:]M:]S`
    #[arg(short, long, default_value = "00:00:00")]
    pub default_time: String,

    /// Count up towards the default time instead of down from it
    #[arg(short, long)]
    pub reverse: bool,

    /// Disable ANSI colours in the console display
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
