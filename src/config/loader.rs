// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading.

use crate::error::{ConfigError, GpushError, Result};
use std::path::{Path, PathBuf};

use super::schema::GpushConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["gpush.toml", ".gpush.toml", ".config/gpush.toml"];

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let gpush_config = config_dir.join("gpush").join("config.toml");
        if gpush_config.is_file() {
            return Some(gpush_config);
        }
    }

    None
}

/// Load configuration searching upward from `dir`.
pub fn load_config_for(dir: &Path) -> Result<GpushConfig> {
    match find_config_file_from(dir) {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found from {:?}, using defaults", dir);
            Ok(GpushConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<GpushConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(GpushError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        GpushError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<GpushConfig> {
    toml::from_str(content).map_err(|e| {
        GpushError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}
