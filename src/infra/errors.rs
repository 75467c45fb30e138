// src/infra/errors.rs — Error types for reprompt

use thiserror::Error;

/// Failure reported by the text-generation service boundary.
///
/// Carried unmodified into the run outcome. The refinement loop never
/// retries these itself; retry policy belongs to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {detail}")]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub detail: String,
}

impl GenerationError {
    pub fn new(kind: GenerationErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            GenerationErrorKind::RateLimited | GenerationErrorKind::ServiceUnavailable
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// Credential rejected by the service.
    AuthFailure,
    /// Request throttled by the service.
    RateLimited,
    /// Transport failure or 5xx from the service.
    ServiceUnavailable,
    /// Body unparseable or completion contained no text.
    InvalidResponse,
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::AuthFailure => write!(f, "auth failure"),
            GenerationErrorKind::RateLimited => write!(f, "rate limited"),
            GenerationErrorKind::ServiceUnavailable => write!(f, "service unavailable"),
            GenerationErrorKind::InvalidResponse => write!(f, "invalid response"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RepromptError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
