// src/provider/mod.rs — Generation service boundary

pub mod gradient;
pub mod roles;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::errors::GenerationError;

/// Core trait the refinement loop drives: one call, one completion.
///
/// Implementations make a single request with no internal retries and no
/// caching; each call is stateless with respect to prior calls.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    fn id(&self) -> &str;

    async fn generate(&self, request: GenerationRequest) -> Result<Completion, GenerationError>;
}

/// Which half of the refinement loop a request serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenRole {
    /// Produces the candidate content being judged.
    Task,
    /// Rewrites the Task prompt from rubric failures.
    Meta,
}

impl std::fmt::Display for GenRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenRole::Task => write!(f, "task"),
            GenRole::Meta => write!(f, "meta"),
        }
    }
}

/// One generation request. Passed by value; the client shares no mutable
/// state with the controller.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub role: GenRole,
    pub model: String,
    pub prompt: String,
    pub system: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(role: GenRole, model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            role,
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_profile(mut self, profile: &crate::infra::config::GenerationProfile) -> Self {
        self.system = Some(profile.system.clone());
        self.temperature = Some(profile.temperature);
        self.max_tokens = Some(profile.max_tokens);
        self
    }
}

/// Completion text plus the usage the service reported for the call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    pub fn add(&mut self, other: &TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_role_display() {
        assert_eq!(format!("{}", GenRole::Task), "task");
        assert_eq!(format!("{}", GenRole::Meta), "meta");
    }

    #[test]
    fn test_request_new_defaults() {
        let r = GenerationRequest::new(GenRole::Task, "llama3.3-70b-instruct", "Write a brief");
        assert_eq!(r.role, GenRole::Task);
        assert_eq!(r.model, "llama3.3-70b-instruct");
        assert_eq!(r.prompt, "Write a brief");
        assert!(r.system.is_none());
        assert!(r.temperature.is_none());
        assert!(r.max_tokens.is_none());
    }

    #[test]
    fn test_request_with_profile() {
        let profile = crate::infra::config::GenerationProfile {
            system: "sys".into(),
            temperature: 0.2,
            max_tokens: 700,
        };
        let r = GenerationRequest::new(GenRole::Meta, "m", "p").with_profile(&profile);
        assert_eq!(r.system.as_deref(), Some("sys"));
        assert_eq!(r.temperature, Some(0.2));
        assert_eq!(r.max_tokens, Some(700));
    }

    #[test]
    fn test_token_usage_total() {
        let u = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(u.total(), 150);
    }

    #[test]
    fn test_token_usage_add() {
        let mut u = TokenUsage::default();
        u.add(&TokenUsage {
            input_tokens: 10,
            output_tokens: 5,
        });
        u.add(&TokenUsage {
            input_tokens: 20,
            output_tokens: 15,
        });
        assert_eq!(u.input_tokens, 30);
        assert_eq!(u.output_tokens, 20);
        assert_eq!(u.total(), 50);
    }
}
