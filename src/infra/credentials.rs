// src/infra/credentials.rs — Access-key resolution

use std::path::{Path, PathBuf};

use crate::infra::errors::RepromptError;
use crate::infra::paths;

/// Environment variable holding the Gradient inference access key.
pub const ACCESS_KEY_ENV: &str = "GRADIENT_MODEL_ACCESS_KEY";

/// Saved-key file consulted when the env var is absent.
pub fn key_file_path() -> PathBuf {
    paths::credentials_dir().join("gradient.key")
}

/// Resolve the access key: env var first, then saved key file.
///
/// A missing key is a configuration error and is raised before any
/// generation call is made.
pub fn resolve_access_key() -> Result<String, RepromptError> {
    resolve_from(std::env::var(ACCESS_KEY_ENV).ok(), &key_file_path())
}

fn resolve_from(env_value: Option<String>, key_file: &Path) -> Result<String, RepromptError> {
    if let Some(key) = env_value {
        let key = key.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    if let Ok(contents) = std::fs::read_to_string(key_file) {
        let key = contents.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    Err(RepromptError::Config(format!(
        "No access key found. Set {} or save the key to {}.",
        ACCESS_KEY_ENV,
        key_file.display()
    )))
}
