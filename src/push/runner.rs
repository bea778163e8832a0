// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The stage, commit, push workflow.

use std::path::PathBuf;

use crate::config::GpushConfig;
use crate::error::{Result, ResultExt};
use crate::git::{commit_args, push_args, stage_args, Git, ProcessOutcome};

use super::log::OutcomeLog;
use super::report::Reporter;
use super::result::{PushOutcome, PushResult};

/// Runs the workflow once against a working directory.
pub struct PushRunner {
    config: GpushConfig,
    git: Git,
    log: OutcomeLog,
}

impl PushRunner {
    /// Create a runner for `workdir` using `config`.
    pub fn new(config: GpushConfig, workdir: impl Into<PathBuf>) -> Self {
        let workdir = workdir.into();
        let git = Git::new(config.git.program.clone(), workdir.clone());
        let log = OutcomeLog::new(config.log.resolve(&workdir));

        Self { config, git, log }
    }

    /// The log this runner writes to.
    pub fn log(&self) -> &OutcomeLog {
        &self.log
    }

    /// Command lines a run would execute, in order.
    pub fn plan(&self) -> Vec<String> {
        let mut plan = Vec::new();

        let identity = &self.config.identity;
        if let Some(ref email) = identity.email {
            plan.push(self.git.describe(&["config", "user.email", email.as_str()]));
        }
        if let Some(ref name) = identity.name {
            plan.push(self.git.describe(&["config", "user.name", name.as_str()]));
        }

        plan.push(self.git.describe(&stage_args()));
        plan.push(self.git.describe(&commit_args(&self.config.commit.message)));
        plan.push(self.git.describe(&push_args(
            &self.config.push.remote,
            &self.config.push.branch,
        )));
        plan
    }

    /// Run the workflow.
    ///
    /// Returns an error only when preparation or staging fails, in which
    /// case the log is left untouched. Every later failure becomes the
    /// returned outcome, which has already been printed and logged.
    pub fn run(&self, reporter: &Reporter) -> Result<PushOutcome> {
        reporter.banner();

        self.prepare()?;

        let outcome = match self.commit_and_push(reporter) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, "Run failed after staging");
                PushOutcome::Errored(e.to_string())
            }
        };

        reporter.outcome(&outcome);
        self.record(outcome, reporter)
    }

    fn prepare(&self) -> Result<()> {
        if self.config.identity.is_set() {
            self.git.configure_identity(&self.config.identity)?;
        }

        self.git.stage_all()?;
        tracing::debug!(workdir = ?self.git.workdir(), "Staged working directory");
        Ok(())
    }

    fn commit_and_push(&self, reporter: &Reporter) -> Result<PushOutcome> {
        let commit = self.git.commit(&self.config.commit.message)?;
        if !commit.success() {
            // "nothing to commit" lands here too
            tracing::debug!(
                exit_code = commit.exit_code,
                stdout = %commit.stdout.trim(),
                "Commit step did not succeed, continuing"
            );
        }

        reporter.pushing();

        let push = &self.config.push;
        let outcome = match self.git.push(&push.remote, &push.branch, push.timeout())? {
            ProcessOutcome::Completed(output) => PushOutcome::Completed(PushResult::from(output)),
            ProcessOutcome::TimedOut => {
                tracing::warn!(timeout_secs = push.timeout_secs, "Push timed out");
                PushOutcome::TimedOut
            }
        };

        Ok(outcome)
    }

    /// Persist the outcome. A failed write is itself logged as an error
    /// outcome when possible.
    fn record(&self, outcome: PushOutcome, reporter: &Reporter) -> Result<PushOutcome> {
        match self.log.write(&outcome) {
            Ok(()) => Ok(outcome),
            Err(e) if !matches!(outcome, PushOutcome::Errored(_)) => {
                let errored = PushOutcome::Errored(e.to_string());
                reporter.outcome(&errored);
                self.log
                    .write(&errored)
                    .context(format!("write {}", self.log.path().display()))?;
                Ok(errored)
            }
            Err(e) => Err(e).context(format!("write {}", self.log.path().display())),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::{GitError, GpushError};
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    /// Install a stand-in git that records its arguments and then runs `body`.
    fn fake_git(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-git");
        let script = format!("#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"$(dirname \"$0\")/calls.txt\"\n{}\n", body);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn runner(dir: &TempDir, body: &str) -> PushRunner {
        let tools = dir.path().join("tools");
        let work = dir.path().join("work");
        std::fs::create_dir_all(&tools).unwrap();
        std::fs::create_dir_all(&work).unwrap();

        let mut config = GpushConfig::default();
        config.git.program = fake_git(&tools, body);
        config.push.timeout_secs = 1;
        PushRunner::new(config, work)
    }

    fn calls(dir: &TempDir) -> Vec<String> {
        std::fs::read_to_string(dir.path().join("tools").join("calls.txt"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_completed_push_is_logged() {
        let dir = TempDir::new().unwrap();
        let runner = runner(
            &dir,
            r#"case "$1" in
  push) echo "accepted"; echo "To origin" >&2; exit 0 ;;
esac"#,
        );

        let outcome = runner.run(&Reporter::quiet()).unwrap();

        assert!(matches!(outcome, PushOutcome::Completed(ref r) if r.exit_code == 0));
        assert_eq!(
            runner.log().read().unwrap().as_deref(),
            Some("STDOUT: accepted\n\nSTDERR: To origin\n\nCode: 0\n")
        );
        assert_eq!(
            calls(&dir),
            vec![
                "add .",
                "commit -m chore: force push via python",
                "push origin main",
            ]
        );
    }

    #[test]
    fn test_commit_failure_is_ignored() {
        let dir = TempDir::new().unwrap();
        let runner = runner(
            &dir,
            r#"case "$1" in
  commit) echo "nothing to commit, working tree clean"; exit 1 ;;
  push) echo "Everything up-to-date" >&2; exit 0 ;;
esac"#,
        );

        let outcome = runner.run(&Reporter::quiet()).unwrap();

        assert_eq!(
            outcome.log_contents(),
            "STDOUT: \nSTDERR: Everything up-to-date\n\nCode: 0\n"
        );
        assert_eq!(calls(&dir).len(), 3);
    }

    #[test]
    fn test_push_timeout_writes_sentinel() {
        let dir = TempDir::new().unwrap();
        let runner = runner(
            &dir,
            r#"case "$1" in
  push) echo "partial"; sleep 10 ;;
esac"#,
        );

        let outcome = runner.run(&Reporter::quiet()).unwrap();

        assert_eq!(outcome, PushOutcome::TimedOut);
        assert_eq!(runner.log().read().unwrap().as_deref(), Some("TIMEOUT"));
    }

    #[test]
    fn test_staging_failure_leaves_log_untouched() {
        let dir = TempDir::new().unwrap();
        let runner = runner(
            &dir,
            r#"case "$1" in
  add) echo "fatal: not a git repository" >&2; exit 128 ;;
esac"#,
        );
        std::fs::write(runner.log().path(), "previous").unwrap();

        let err = runner.run(&Reporter::quiet()).unwrap_err();

        assert!(matches!(err, GpushError::Git(GitError::StageFailed { .. })));
        assert_eq!(runner.log().read().unwrap().as_deref(), Some("previous"));
        assert_eq!(calls(&dir), vec!["add ."]);
    }

    #[test]
    fn test_unwritable_log_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut runner = runner(&dir, "exit 0");
        runner.log = OutcomeLog::new(dir.path().join("missing-dir").join("log.txt"));

        let err = runner.run(&Reporter::quiet()).unwrap_err();
        assert!(matches!(err, GpushError::WithContext { .. }));
    }

    #[test]
    fn test_identity_configured_before_staging() {
        let dir = TempDir::new().unwrap();
        let mut runner = runner(&dir, "exit 0");
        runner.config.identity.email = Some("bot@example.com".to_string());

        runner.run(&Reporter::quiet()).unwrap();

        let calls = calls(&dir);
        assert_eq!(calls[0], "config user.email bot@example.com");
        assert_eq!(calls[1], "add .");
    }

    #[test]
    fn test_plan() {
        let mut config = GpushConfig::default();
        config.push.branch = "release".to_string();
        let runner = PushRunner::new(config, "/repo");

        assert_eq!(
            runner.plan(),
            vec![
                "git add .",
                "git commit -m \"chore: force push via python\"",
                "git push origin release",
            ]
        );
    }
}
