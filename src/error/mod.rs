// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for gpush.
//!
//! Only preparation failures (configuration, identity, staging) surface as
//! errors from a run. Everything after staging is folded into the logged
//! outcome instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gpush operations.
#[derive(Error, Debug)]
pub enum GpushError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("Failed to stage changes: {message}")]
    StageFailed { message: String },

    #[error("Failed to configure identity: {message}")]
    IdentityFailed { message: String },
}

/// Result type alias for gpush operations.
pub type Result<T> = std::result::Result<T, GpushError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| GpushError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/gpush.toml"),
        };
        assert!(err.to_string().contains("/path/to/gpush.toml"));
    }

    #[test]
    fn test_stage_error_wraps_into_top_level() {
        let err: GpushError = GitError::StageFailed {
            message: "fatal: not a git repository".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Git error: Failed to stage changes: fatal: not a git repository"
        );
    }

    #[test]
    fn test_result_ext_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = io.context("write log").unwrap_err();
        assert_eq!(err.to_string(), "write log: denied");
    }
}
