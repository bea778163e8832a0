// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for gpush.
//!
//! This module handles loading and parsing configuration from a gpush.toml
//! file, then layering command-line and environment overrides on top.

pub mod default;
mod loader;
mod schema;

pub use loader::{find_config_file_from, load_config_for, parse_config};
pub use schema::*;
