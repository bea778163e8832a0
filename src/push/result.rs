// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Push result and run outcome types.

use serde::Serialize;

use crate::git::CapturedOutput;

/// Log contents written when the push exceeds its bound.
pub const TIMEOUT_SENTINEL: &str = "TIMEOUT";

/// Console line shown when the push exceeds its bound.
pub const TIMEOUT_MESSAGE: &str = "TIMEOUT EXPIRED - Likely password prompt";

/// What the push step produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
}

impl PushResult {
    /// A result standing in for a push that never finished.
    pub fn timed_out() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: -1,
            timed_out: true,
        }
    }
}

impl From<CapturedOutput> for PushResult {
    fn from(output: CapturedOutput) -> Self {
        Self {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
            timed_out: false,
        }
    }
}

/// The three mutually exclusive ways a run can end once staging succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// The push exited within its bound, successfully or not.
    Completed(PushResult),
    /// The push was killed at its bound.
    TimedOut,
    /// Something else went wrong after staging.
    Errored(String),
}

impl PushOutcome {
    /// Short machine-readable name of the outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            PushOutcome::Completed(_) => "completed",
            PushOutcome::TimedOut => "timed_out",
            PushOutcome::Errored(_) => "errored",
        }
    }

    /// The push result, if the push step got far enough to have one.
    pub fn result(&self) -> Option<PushResult> {
        match self {
            PushOutcome::Completed(result) => Some(result.clone()),
            PushOutcome::TimedOut => Some(PushResult::timed_out()),
            PushOutcome::Errored(_) => None,
        }
    }

    /// Exact text persisted to the log file.
    pub fn log_contents(&self) -> String {
        match self {
            PushOutcome::Completed(result) => format!(
                "STDOUT: {}\nSTDERR: {}\nCode: {}\n",
                result.stdout, result.stderr, result.exit_code
            ),
            PushOutcome::TimedOut => TIMEOUT_SENTINEL.to_string(),
            PushOutcome::Errored(message) => format!("ERROR: {}", message),
        }
    }

    /// Console lines mirroring the log.
    pub fn console_lines(&self) -> Vec<String> {
        match self {
            PushOutcome::Completed(result) => vec![
                format!("STDOUT: {}", result.stdout),
                format!("STDERR: {}", result.stderr),
                format!("Return Code: {}", result.exit_code),
            ],
            PushOutcome::TimedOut => vec![TIMEOUT_MESSAGE.to_string()],
            PushOutcome::Errored(message) => vec![format!("ERROR: {}", message)],
        }
    }

    /// JSON rendering for `--format json`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut json = serde_json::json!({ "outcome": self.kind() });

        if let Some(result) = self.result() {
            json["result"] = serde_json::to_value(result).unwrap_or_default();
        }
        if let PushOutcome::Errored(message) = self {
            json["error"] = serde_json::Value::String(message.clone());
        }

        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed() -> PushOutcome {
        PushOutcome::Completed(PushResult {
            stdout: "Everything up-to-date".to_string(),
            stderr: "To github.com:me/repo.git".to_string(),
            exit_code: 0,
            timed_out: false,
        })
    }

    #[test]
    fn test_completed_log_format() {
        assert_eq!(
            completed().log_contents(),
            "STDOUT: Everything up-to-date\nSTDERR: To github.com:me/repo.git\nCode: 0\n"
        );
    }

    #[test]
    fn test_timeout_log_is_sentinel_only() {
        assert_eq!(PushOutcome::TimedOut.log_contents(), "TIMEOUT");
    }

    #[test]
    fn test_error_log_format() {
        let outcome = PushOutcome::Errored("Permission denied".to_string());
        assert_eq!(outcome.log_contents(), "ERROR: Permission denied");
        assert!(outcome.result().is_none());
    }

    #[test]
    fn test_console_mirrors_completed() {
        assert_eq!(
            completed().console_lines(),
            vec![
                "STDOUT: Everything up-to-date",
                "STDERR: To github.com:me/repo.git",
                "Return Code: 0",
            ]
        );
    }

    #[test]
    fn test_timed_out_result_flag() {
        let result = PushOutcome::TimedOut.result().unwrap();
        assert!(result.timed_out);
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn test_json_rendering() {
        let json = completed().to_json();
        assert_eq!(json["outcome"], "completed");
        assert_eq!(json["result"]["exit_code"], 0);
        assert_eq!(json["result"]["timed_out"], false);

        let json = PushOutcome::Errored("boom".to_string()).to_json();
        assert_eq!(json["outcome"], "errored");
        assert_eq!(json["error"], "boom");
        assert!(json.get("result").is_none());
    }
}
