// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Console reporting for a run.

use console::{style, Term};

use crate::cli::args::OutputFormat;

use super::result::PushOutcome;

/// Startup banner.
pub const BANNER: &str = "Starting git push...";

/// Writes progress and the outcome to the terminal.
///
/// In JSON mode progress goes to stderr so stdout carries only the outcome
/// document.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: OutputFormat,
    quiet: bool,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quiet: false,
        }
    }

    /// A reporter that prints nothing.
    pub fn quiet() -> Self {
        Self {
            format: OutputFormat::Text,
            quiet: true,
        }
    }

    fn progress_term(&self) -> Term {
        match self.format {
            OutputFormat::Text => Term::stdout(),
            OutputFormat::Json => Term::stderr(),
        }
    }

    fn progress(&self, line: &str) {
        if !self.quiet {
            let _ = self.progress_term().write_line(line);
        }
    }

    pub fn banner(&self) {
        self.progress(&style(BANNER).bold().to_string());
    }

    pub fn pushing(&self) {
        self.progress("Pushing...");
    }

    /// Print the outcome, mirroring what the log holds.
    pub fn outcome(&self, outcome: &PushOutcome) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Text => self.print_text(outcome),
            OutputFormat::Json => self.print_json(outcome),
        }
    }

    fn print_text(&self, outcome: &PushOutcome) {
        let term = Term::stdout();
        for line in outcome.console_lines() {
            let line = match outcome {
                PushOutcome::Completed(_) => line,
                PushOutcome::TimedOut => style(line).yellow().bold().to_string(),
                PushOutcome::Errored(_) => style(line).red().to_string(),
            };
            let _ = term.write_line(&line);
        }
    }

    fn print_json(&self, outcome: &PushOutcome) {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome.to_json()).unwrap_or_default()
        );
    }
}
