// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# gpush configuration
# Every key is optional; the values below are the defaults.

[commit]
# Message used for the best-effort commit step
message = "chore: force push via python"

[push]
remote = "origin"
branch = "main"
# The push is abandoned after this many seconds
timeout_secs = 30

[log]
# Overwritten on every run; relative to the working directory
path = "python_push_log.txt"

[git]
program = "git"

# Written to the repository config before staging when set
[identity]
# email = "bot@example.com"
# name = "Push Bot"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GpushConfig;

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed: GpushConfig =
            toml::from_str(example_config()).expect("Example config should parse");
        assert_eq!(parsed, GpushConfig::default());
    }
}
