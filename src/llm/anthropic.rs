//! Anthropic Messages API client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::types::{ContentBlock, LlmResponse, Message, StopReason, ToolSchema};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    InvalidResponse(String),
}

/// Client abstraction for the reasoning engine.
///
/// The orchestration loop only sees this trait, so tests can script
/// responses without touching the network.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Make one engine call with the full message sequence, system
    /// instructions, and optionally the tools the engine may invoke.
    async fn complete(
        &self,
        messages: &[Message],
        system: &str,
        tools: Option<&[ToolSchema]>,
    ) -> Result<LlmResponse, LlmError>;
}

/// Concrete client for the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

const ANTHROPIC_VERSION: &str = "2023-06-01";

impl AnthropicClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url,
            max_tokens: 800,
        }
    }

    fn request_body(
        &self,
        messages: &[Message],
        system: &str,
        tools: Option<&[ToolSchema]>,
    ) -> Value {
        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": 0,
            "system": system,
            "messages": messages,
        });
        if let Some(tools) = tools {
            body["tools"] = json!(tools);
            body["tool_choice"] = json!({"type": "auto"});
        }
        body
    }
}

#[derive(Deserialize)]
struct WireResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<StopReason>,
}

#[derive(Deserialize)]
struct WireError {
    error: WireErrorDetail,
}

#[derive(Deserialize)]
struct WireErrorDetail {
    message: String,
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(
        &self,
        messages: &[Message],
        system: &str,
        tools: Option<&[ToolSchema]>,
    ) -> Result<LlmResponse, LlmError> {
        let body = self.request_body(messages, system, tools);

        let response = self
            .http
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<WireError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("{}", e)))?;

        Ok(LlmResponse {
            content: wire.content,
            stop_reason: wire.stop_reason.unwrap_or(StopReason::EndTurn),
        })
    }
}
