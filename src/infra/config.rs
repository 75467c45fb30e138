// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::RepromptError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub refine: RefineConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub profiles: ProfilesConfig,

    #[serde(default)]
    pub meta: MetaConfig,
}

/// Per-role model ids. Unset roles fall back to the shared default
/// (`roles::DEFAULT_MODEL`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub task: Option<String>,
    pub meta: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineConfig {
    /// Iteration budget for one refinement run. Must be positive.
    pub max_iterations: u32,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self { max_iterations: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OpenAI-compatible chat completions endpoint.
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: crate::provider::gradient::DEFAULT_BASE_URL.into(),
        }
    }
}

/// Request parameters for one generation role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProfile {
    pub system: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesConfig {
    #[serde(default = "ProfilesConfig::task_default")]
    pub task: GenerationProfile,
    #[serde(default = "ProfilesConfig::meta_default")]
    pub meta: GenerationProfile,
}

impl ProfilesConfig {
    fn task_default() -> GenerationProfile {
        GenerationProfile {
            system: "You are a helpful market-research assistant.".into(),
            temperature: 0.2,
            max_tokens: 700,
        }
    }

    fn meta_default() -> GenerationProfile {
        GenerationProfile {
            system: "You rewrite prompts to improve LLM output quality.".into(),
            temperature: 0.0,
            max_tokens: 300,
        }
    }
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            task: Self::task_default(),
            meta: Self::meta_default(),
        }
    }
}

/// Optional override for the Meta-role rewrite template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaConfig {
    pub template: Option<String>,
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, RepromptError> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, RepromptError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Checks detected before the loop starts, with no generation calls made.
    pub fn validate(&self) -> Result<(), RepromptError> {
        if self.refine.max_iterations == 0 {
            return Err(RepromptError::Config(
                "refine.max_iterations must be positive".into(),
            ));
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(RepromptError::Config("provider.base_url is empty".into()));
        }
        Ok(())
    }
}
