// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git command wrappers for staging, committing and pushing.

use crate::config::IdentityConfig;
use crate::error::{GitError, GpushError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use super::process::{self, CapturedOutput, ProcessOutcome};

/// A git executable bound to a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
    workdir: PathBuf,
}

impl Git {
    /// Create a wrapper running `program` inside `workdir`.
    pub fn new(program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    /// The working directory commands run in.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Render a command line for display.
    pub fn describe(&self, args: &[&str]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push_str(&format!("{:?}", arg));
            } else {
                line.push_str(arg);
            }
        }
        line
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.workdir);
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> GpushError {
        GpushError::Git(GitError::SpawnFailed {
            program: self.program.display().to_string(),
            message: e.to_string(),
        })
    }

    fn run(&self, args: &[&str]) -> Result<CapturedOutput> {
        tracing::debug!(command = %self.describe(args), "Running git");
        process::run_captured(&mut self.command(args)).map_err(|e| self.spawn_error(e))
    }

    /// Stage everything in the working directory.
    pub fn stage_all(&self) -> Result<()> {
        let output = self.run(&stage_args())?;

        if !output.success() {
            return Err(GpushError::Git(GitError::StageFailed {
                message: failure_message(&output),
            }));
        }

        Ok(())
    }

    /// Write the configured identity into the repository config.
    pub fn configure_identity(&self, identity: &IdentityConfig) -> Result<()> {
        let entries = [("user.email", &identity.email), ("user.name", &identity.name)];

        for (key, value) in entries {
            let Some(value) = value else { continue };
            let output = self.run(&["config", key, value.as_str()])?;

            if !output.success() {
                return Err(GpushError::Git(GitError::IdentityFailed {
                    message: format!("{}: {}", key, failure_message(&output)),
                }));
            }
        }

        Ok(())
    }

    /// Commit staged changes. The exit status is returned, not judged.
    pub fn commit(&self, message: &str) -> Result<CapturedOutput> {
        self.run(&commit_args(message))
    }

    /// Push `branch` to `remote`, giving up after `timeout`.
    pub fn push(&self, remote: &str, branch: &str, timeout: Duration) -> Result<ProcessOutcome> {
        let args = push_args(remote, branch);
        tracing::debug!(command = %self.describe(&args), ?timeout, "Running git");
        process::run_with_timeout(&mut self.command(&args), timeout)
            .map_err(|e| self.spawn_error(e))
    }
}

/// Arguments of the staging step.
pub fn stage_args() -> [&'static str; 2] {
    ["add", "."]
}

/// Arguments of the commit step.
pub fn commit_args(message: &str) -> [&str; 3] {
    ["commit", "-m", message]
}

/// Arguments of the push step.
pub fn push_args<'a>(remote: &'a str, branch: &'a str) -> [&'a str; 3] {
    ["push", remote, branch]
}

fn failure_message(output: &CapturedOutput) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        format!("exited with code {}", output.exit_code)
    } else {
        stderr.to_string()
    }
}
