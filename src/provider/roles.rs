// src/provider/roles.rs — Role-based model assignment

use super::GenRole;

/// Default model for both roles when nothing is configured.
pub const DEFAULT_MODEL: &str = "llama3.3-70b-instruct";

/// Assigns a model id to each generation role in the refinement loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleModels {
    pub task: String,
    pub meta: String,
}

impl RoleModels {
    /// Use the same model for both roles.
    pub fn from_single(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            task: model.clone(),
            meta: model,
        }
    }

    /// Build from explicit config, filling gaps with the default model.
    pub fn from_config(default: &str, task: Option<&str>, meta: Option<&str>) -> Self {
        Self {
            task: task.unwrap_or(default).to_string(),
            meta: meta.unwrap_or(default).to_string(),
        }
    }

    pub fn for_role(&self, role: GenRole) -> &str {
        match role {
            GenRole::Task => &self.task,
            GenRole::Meta => &self.meta,
        }
    }
}

impl Default for RoleModels {
    fn default() -> Self {
        Self::from_single(DEFAULT_MODEL)
    }
}
