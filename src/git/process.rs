// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Child process execution with output capture and an optional deadline.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Output, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// How often a bounded wait checks whether the child has exited.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CapturedOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: exit_code(output.status),
        }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Result of a bounded wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The process exited before the deadline.
    Completed(CapturedOutput),
    /// The deadline passed with the process or its output still open.
    TimedOut,
}

/// Run a command to completion and capture its output.
pub fn run_captured(cmd: &mut Command) -> io::Result<CapturedOutput> {
    let output = cmd.output()?;
    Ok(CapturedOutput::from_output(&output))
}

/// Run a command, killing it if it has not exited within `timeout`.
///
/// Both pipes are drained on background threads so a chatty child cannot
/// block on a full pipe. The deadline covers the pipes too: helpers spawned
/// by the child (ssh masters, credential caches) can hold them open after
/// the child itself is gone, and such a run counts as timed out. Reader
/// threads still blocked at that point are abandoned rather than joined.
pub fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> io::Result<ProcessOutcome> {
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().map(|pipe| drain("stdout", pipe));
    let stderr = child.stderr.take().map(|pipe| drain("stderr", pipe));

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }

        let now = Instant::now();
        if now >= deadline {
            tracing::debug!(pid = child.id(), "Deadline reached, killing child");
            // Already exited between the poll and here
            let _ = child.kill();
            let _ = child.wait();
            return Ok(ProcessOutcome::TimedOut);
        }

        thread::sleep(POLL_INTERVAL.min(deadline - now));
    };

    let (Some(stdout), Some(stderr)) = (collect(stdout, deadline), collect(stderr, deadline))
    else {
        tracing::debug!(
            code = exit_code(status),
            "Child exited but its output stayed open past the deadline"
        );
        return Ok(ProcessOutcome::TimedOut);
    };

    Ok(ProcessOutcome::Completed(CapturedOutput {
        stdout,
        stderr,
        exit_code: exit_code(status),
    }))
}

fn drain<R: Read + Send + 'static>(name: &'static str, mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Err(e) = pipe.read_to_end(&mut buf) {
            tracing::debug!(pipe = name, error = %e, read = buf.len(), "Failed reading child output");
        }
        // The receiver is gone once the deadline passed
        let _ = tx.send(buf);
    });
    rx
}

/// Wait for a drained pipe until `deadline`. `None` means the pipe was still
/// open when the deadline passed.
fn collect(rx: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Option<String> {
    let Some(rx) = rx else {
        return Some(String::new());
    };

    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

/// Exit code of a finished process. A signal death is reported as the
/// negated signal number.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
