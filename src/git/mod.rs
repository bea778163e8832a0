// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Every operation shells out to the git executable; nothing here parses
//! git's output.

pub mod commands;
pub mod process;

pub use commands::{commit_args, push_args, stage_args, Git};
pub use process::{run_captured, run_with_timeout, CapturedOutput, ProcessOutcome};
