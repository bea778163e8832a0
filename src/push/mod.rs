// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Push workflow module.
//!
//! Stages everything, commits best-effort, pushes with a bounded wait and
//! records the outcome in a single overwritten log file.

mod log;
mod report;
mod result;
mod runner;

pub use log::OutcomeLog;
pub use report::{Reporter, BANNER};
pub use result::{PushOutcome, PushResult, TIMEOUT_MESSAGE, TIMEOUT_SENTINEL};
pub use runner::PushRunner;
