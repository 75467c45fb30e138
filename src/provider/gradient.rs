// src/provider/gradient.rs — DigitalOcean Gradient serverless inference client
//
// Gradient exposes an OpenAI-compatible chat completions endpoint, so the
// wire format is the familiar messages/choices shape.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Completion, GenerationClient, GenerationRequest, TokenUsage};
use crate::infra::errors::{GenerationError, GenerationErrorKind};

/// Default serverless inference endpoint.
pub const DEFAULT_BASE_URL: &str = "https://inference.do-ai.run/v1";

pub struct GradientClient {
    access_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GradientClient {
    pub fn new(access_key: String) -> Self {
        Self::with_base_url(access_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(access_key: String, base_url: impl Into<String>) -> Self {
        Self {
            access_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn build_request_body(request: &GenerationRequest) -> serde_json::Value {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(serde_json::json!({"role": "system", "content": system}));
        }
        messages.push(serde_json::json!({"role": "user", "content": request.prompt}));

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
        });
        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        body
    }

    fn classify_status(status: StatusCode) -> GenerationErrorKind {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            GenerationErrorKind::AuthFailure
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            GenerationErrorKind::RateLimited
        } else if status.is_server_error() {
            GenerationErrorKind::ServiceUnavailable
        } else {
            GenerationErrorKind::InvalidResponse
        }
    }
}

#[async_trait]
impl GenerationClient for GradientClient {
    fn id(&self) -> &str {
        "gradient"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Completion, GenerationError> {
        let body = Self::build_request_body(&request);
        tracing::debug!(role = %request.role, model = %request.model, "chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.access_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::ServiceUnavailable, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GenerationError::new(
                Self::classify_status(status),
                format!("HTTP {status}: {error_body}"),
            ));
        }

        let resp: serde_json::Value = response.json().await.map_err(|e| {
            GenerationError::new(
                GenerationErrorKind::InvalidResponse,
                format!("unparseable body: {e}"),
            )
        })?;

        let text = resp["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();
        if text.trim().is_empty() {
            return Err(GenerationError::new(
                GenerationErrorKind::InvalidResponse,
                "completion contained no text",
            ));
        }

        let usage = TokenUsage {
            input_tokens: resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: resp["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
        };

        Ok(Completion { text, usage })
    }
}
