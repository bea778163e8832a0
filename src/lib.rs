// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! gpush - stage, commit and push in one step.
//!
//! Runs `git add .`, a best-effort `git commit`, then `git push` with a time
//! limit, and records the push outcome in a log file that is overwritten on
//! every run.
//!
//! # Example
//!
//! ```no_run
//! use gpush::config::GpushConfig;
//! use gpush::push::{PushOutcome, PushRunner, Reporter};
//!
//! let workdir = std::env::current_dir().unwrap();
//! let config = GpushConfig::load_for(&workdir).unwrap();
//! let runner = PushRunner::new(config, workdir);
//!
//! match runner.run(&Reporter::quiet()).unwrap() {
//!     PushOutcome::Completed(result) => println!("exit code {}", result.exit_code),
//!     PushOutcome::TimedOut => println!("push blocked, likely on a credential prompt"),
//!     PushOutcome::Errored(message) => println!("failed: {}", message),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod push;

pub use config::GpushConfig;
pub use error::{GpushError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of gpush.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// The git branch at compile time (if available).
    pub const GIT_BRANCH: Option<&str> = option_env!("VERGEN_GIT_BRANCH");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
