// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from gpush.toml.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Commit message used when none is configured.
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: force push via python";

/// Remote pushed to when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch pushed when none is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Upper bound on the push step, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log file written in the working directory.
pub const DEFAULT_LOG_FILE: &str = "python_push_log.txt";

/// The main configuration structure for gpush.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GpushConfig {
    /// Commit step configuration.
    pub commit: CommitConfig,

    /// Push step configuration.
    pub push: PushConfig,

    /// Outcome log configuration.
    pub log: LogConfig,

    /// Git executable configuration.
    pub git: GitConfig,

    /// Optional committer identity written to the repository config.
    pub identity: IdentityConfig,
}

impl GpushConfig {
    /// Load configuration searching upward from a specific directory.
    pub fn load_for(dir: &Path) -> crate::error::Result<Self> {
        super::loader::load_config_for(dir)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(ref message) = overrides.message {
            self.commit.message = message.clone();
        }
        if let Some(ref remote) = overrides.remote {
            self.push.remote = remote.clone();
        }
        if let Some(ref branch) = overrides.branch {
            self.push.branch = branch.clone();
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.push.timeout_secs = timeout;
        }
        if let Some(ref path) = overrides.log_file {
            self.log.path = path.clone();
        }
        if let Some(ref program) = overrides.git {
            self.git.program = program.clone();
        }
    }

    /// Check values that would make a run meaningless.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        let invalid = |key: &str, message: &str| -> crate::error::Result<()> {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: message.to_string(),
            }
            .into())
        };

        if self.push.remote.trim().is_empty() {
            return invalid("push.remote", "must not be empty");
        }
        if self.push.branch.trim().is_empty() {
            return invalid("push.branch", "must not be empty");
        }
        if self.push.timeout_secs == 0 {
            return invalid("push.timeout_secs", "must be at least 1");
        }
        if self.log.path.as_os_str().is_empty() {
            return invalid("log.path", "must not be empty");
        }
        Ok(())
    }
}

/// Commit step configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommitConfig {
    /// Message passed to `git commit -m`.
    pub message: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

/// Push step configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PushConfig {
    /// Remote name.
    pub remote: String,

    /// Branch name.
    pub branch: String,

    /// Seconds to wait for the push before giving up.
    pub timeout_secs: u64,
}

impl PushConfig {
    /// The push bound as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Outcome log configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path, relative paths resolve against the working directory.
    pub path: PathBuf,
}

impl LogConfig {
    /// Resolve the log path against a working directory.
    pub fn resolve(&self, workdir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            workdir.join(&self.path)
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Git executable configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GitConfig {
    /// Program invoked for every git step.
    pub program: PathBuf,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

/// Committer identity.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IdentityConfig {
    /// Value for `user.email`.
    pub email: Option<String>,

    /// Value for `user.name`.
    pub name: Option<String>,
}

impl IdentityConfig {
    /// Whether any identity value is set.
    pub fn is_set(&self) -> bool {
        self.email.is_some() || self.name.is_some()
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub message: Option<String>,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub git: Option<PathBuf>,
}
