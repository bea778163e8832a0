// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;

/// gpush - stage, commit and push in one step
///
/// Stages everything, commits with a fixed message (ignoring "nothing to
/// commit"), pushes with a time limit and writes the outcome to a log file.
#[derive(Parser, Debug)]
#[command(name = "gpush")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Stage, commit and push with a bounded push and an outcome log", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to run if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run as if started in this directory
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the commands that would run without running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Output format for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Per-run overrides of configured values.
#[derive(Args, Debug, Default, Clone)]
pub struct OverrideArgs {
    /// Commit message
    #[arg(short = 'm', long, global = true, env = "GPUSH_MESSAGE")]
    pub message: Option<String>,

    /// Remote to push to
    #[arg(long, global = true, env = "GPUSH_REMOTE")]
    pub remote: Option<String>,

    /// Branch to push
    #[arg(long, global = true, env = "GPUSH_BRANCH")]
    pub branch: Option<String>,

    /// Seconds to wait for the push
    #[arg(long, global = true, env = "GPUSH_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log file path
    #[arg(long, global = true, env = "GPUSH_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Git executable
    #[arg(long, global = true, env = "GPUSH_GIT", value_name = "PATH")]
    pub git: Option<PathBuf>,
}

impl From<&OverrideArgs> for Overrides {
    fn from(args: &OverrideArgs) -> Self {
        Self {
            message: args.message.clone(),
            remote: args.remote.clone(),
            branch: args.branch.clone(),
            timeout_secs: args.timeout,
            log_file: args.log_file.clone(),
            git: args.git.clone(),
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Stage, commit and push (default command)
    Run,

    /// Print the commands a run would execute
    Plan,

    /// Print the outcome log of the last run
    ShowLog,

    /// Write a default gpush.toml
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Run if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command() {
        let args = Cli::parse_from(["gpush"]);
        assert!(args.command.is_none());
        assert!(matches!(args.effective_command(), Commands::Run));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_overrides() {
        let args = Cli::parse_from([
            "gpush",
            "--remote",
            "upstream",
            "--branch",
            "dev",
            "--timeout",
            "5",
            "-m",
            "chore: sync",
        ]);
        let overrides = Overrides::from(&args.overrides);
        assert_eq!(overrides.remote.as_deref(), Some("upstream"));
        assert_eq!(overrides.branch.as_deref(), Some("dev"));
        assert_eq!(overrides.timeout_secs, Some(5));
        assert_eq!(overrides.message.as_deref(), Some("chore: sync"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Cli::parse_from(["gpush", "plan", "--dry-run", "-C", "/repo"]);
        assert!(matches!(args.command, Some(Commands::Plan)));
        assert!(args.dry_run);
        assert_eq!(args.directory, Some(PathBuf::from("/repo")));
    }

    #[test]
    fn test_parse_init() {
        let args = Cli::parse_from(["gpush", "init", "--force"]);
        if let Some(Commands::Init(init)) = args.command {
            assert!(init.force);
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn test_json_format() {
        let args = Cli::parse_from(["gpush", "--format", "json"]);
        assert_eq!(args.format, OutputFormat::Json);
    }
}
