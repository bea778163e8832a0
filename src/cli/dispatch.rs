// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;
use std::path::{Path, PathBuf};

use crate::config::{GpushConfig, Overrides};
use crate::error::{ConfigError, GpushError, Result, ResultExt};
use crate::push::{PushRunner, Reporter};

use super::args::{Cli, Commands, InitArgs, OutputFormat};

/// File written by `gpush init`.
const CONFIG_FILE_NAME: &str = "gpush.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    let workdir = working_directory(&cli)?;

    match cli.effective_command() {
        Commands::Run if cli.dry_run => run_plan(&cli, &workdir),
        Commands::Run => run_push(&cli, &workdir),
        Commands::Plan => run_plan(&cli, &workdir),
        Commands::ShowLog => run_show_log(&cli, &workdir),
        Commands::Init(args) => run_init(&workdir, args),
        Commands::Version => run_version(),
    }
}

fn working_directory(cli: &Cli) -> Result<PathBuf> {
    match cli.directory {
        Some(ref dir) => Ok(dir.clone()),
        None => std::env::current_dir().context("current directory"),
    }
}

/// Load configuration and layer the command-line overrides on top.
fn load_config(cli: &Cli, workdir: &Path) -> Result<GpushConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        GpushConfig::load_from(config_path)?
    } else {
        GpushConfig::load_for(workdir)?
    };

    config.apply(&Overrides::from(&cli.overrides));
    config.validate()?;

    tracing::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Run the push workflow.
fn run_push(cli: &Cli, workdir: &Path) -> Result<()> {
    let config = load_config(cli, workdir)?;
    let runner = PushRunner::new(config, workdir);

    let outcome = runner.run(&Reporter::new(cli.format))?;
    tracing::debug!(outcome = outcome.kind(), log = ?runner.log().path(), "Run finished");

    Ok(())
}

/// Print the commands a run would execute.
fn run_plan(cli: &Cli, workdir: &Path) -> Result<()> {
    let config = load_config(cli, workdir)?;
    let runner = PushRunner::new(config, workdir);
    let plan = runner.plan();

    match cli.format {
        OutputFormat::Text => {
            for line in &plan {
                println!("{}", line);
            }
            println!(
                "{} {}",
                style("log:").dim(),
                runner.log().path().display()
            );
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "commands": plan,
                "log_file": runner.log().path(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }

    Ok(())
}

/// Print the log of the last run.
fn run_show_log(cli: &Cli, workdir: &Path) -> Result<()> {
    let config = load_config(cli, workdir)?;
    let runner = PushRunner::new(config, workdir);
    let log = runner.log();

    let content = log
        .read()
        .context(format!("read {}", log.path().display()))?;

    match (cli.format, content) {
        (OutputFormat::Text, Some(content)) => print!("{}", content),
        (OutputFormat::Text, None) => {
            eprintln!("No push has been logged yet ({})", log.path().display())
        }
        (OutputFormat::Json, content) => {
            let json = serde_json::json!({
                "log_file": log.path(),
                "content": content,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }

    Ok(())
}

/// Write a default configuration file.
fn run_init(workdir: &Path, args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = workdir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !args.force {
        return Err(GpushError::Config(ConfigError::AlreadyExists { path: config_path }));
    }

    std::fs::write(&config_path, example_config()).map_err(|e| GpushError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })?;

    println!("✓ Created {}", config_path.display());

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("gpush {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }
    if let Some(branch) = crate::version::GIT_BRANCH {
        println!("branch: {}", branch);
    }

    Ok(())
}
