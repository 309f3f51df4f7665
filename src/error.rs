//! Error types for the timer engine

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimerError {
    /// The default-time field is not `[[H:]M:]S` made of non-negative integers
    #[error("invalid default time {input:?}: {reason}")]
    Format { input: String, reason: String },

    #[error("failed to write timer output to {path}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TimerError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
