// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The outcome log file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::result::PushOutcome;

/// Single-file log holding the outcome of the most recent run.
#[derive(Debug, Clone)]
pub struct OutcomeLog {
    path: PathBuf,
}

impl OutcomeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the log with the given outcome.
    pub fn write(&self, outcome: &PushOutcome) -> io::Result<()> {
        tracing::debug!(path = ?self.path, outcome = outcome.kind(), "Writing push log");
        fs::write(&self.path, outcome.log_contents())
    }

    /// Contents of the log, or `None` if no run has written one yet.
    pub fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_overwrites_previous_run() {
        let dir = TempDir::new().unwrap();
        let log = OutcomeLog::new(dir.path().join("push.txt"));

        log.write(&PushOutcome::Errored("a much longer first message".to_string()))
            .unwrap();
        log.write(&PushOutcome::TimedOut).unwrap();

        assert_eq!(log.read().unwrap().as_deref(), Some("TIMEOUT"));
    }

    #[test]
    fn test_read_missing_log() {
        let dir = TempDir::new().unwrap();
        let log = OutcomeLog::new(dir.path().join("absent.txt"));
        assert_eq!(log.read().unwrap(), None);
    }
}
