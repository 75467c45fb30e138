// src/infra/paths.rs — Path management
//
// All paths respect the REPROMPT_HOME environment variable for isolation.
// When unset, everything lives under ~/.reprompt/.

use std::path::PathBuf;

/// Returns the REPROMPT_HOME override, if set.
fn reprompt_home() -> Option<PathBuf> {
    std::env::var_os("REPROMPT_HOME").map(PathBuf::from)
}

/// Home directory
fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf()
}

/// Configuration directory: $REPROMPT_HOME/ or ~/.reprompt/
pub fn config_dir() -> PathBuf {
    if let Some(home) = reprompt_home() {
        return home;
    }
    dirs_home().join(".reprompt")
}

/// Credentials directory
pub fn credentials_dir() -> PathBuf {
    config_dir().join("credentials")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_under_config_dir() {
        assert!(config_file_path().starts_with(config_dir()));
    }

    #[test]
    fn test_credentials_under_config_dir() {
        assert!(credentials_dir().starts_with(config_dir()));
        assert!(credentials_dir().ends_with("credentials"));
    }
}
