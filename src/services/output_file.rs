//! Persistence of the rendered time for other processes to read

use std::{fs, path::{Path, PathBuf}};
use tracing::debug;

use crate::error::TimerError;

/// Destination for the rendered time string
pub trait OutputSink {
    /// Replace the previous content with `text`
    fn write(&mut self, text: &str) -> Result<(), TimerError>;
}

/// Plain text file overwritten on every write, no trailing newline
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for OutputFile {
    fn write(&mut self, text: &str) -> Result<(), TimerError> {
        fs::write(&self.path, text).map_err(|source| TimerError::FileIo {
            path: self.path.clone(),
            source,
        })?;
        debug!("Wrote {:?} to {}", text, self.path.display());
        Ok(())
    }
}

/// In-memory sink that keeps every write and can be told to fail
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingOutput {
    pub writes: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    pub failing: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

#[cfg(test)]
impl RecordingOutput {
    pub fn last(&self) -> Option<String> {
        self.writes.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl OutputSink for RecordingOutput {
    fn write(&mut self, text: &str) -> Result<(), TimerError> {
        if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(TimerError::FileIo {
                path: PathBuf::from("recording"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
