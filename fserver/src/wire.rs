//! JSON shapes accepted and returned by the HTTP binding.

use std::time::Duration;

use foundry::{ChatError, ChatErrorKind, ChatMessage, ChatRequest, ChatResult, parse_role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct WireMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireChatRequest {
    #[serde(default)]
    pub messages: Vec<WireMessage>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Caller deadline in milliseconds; overrides the configured request timeout.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl WireChatRequest {
    pub fn into_chat_request(self) -> ChatRequest {
        let messages = self
            .messages
            .into_iter()
            .map(|message| ChatMessage::new(parse_role(&message.role), message.content))
            .collect();

        let mut request = ChatRequest::new(messages);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_output_tokens(max_tokens);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            request = request.with_timeout(Duration::from_millis(timeout_ms));
        }
        request
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTokenUsage {
    pub input: u32,
    pub output: u32,
    pub total: u32,
    /// `backend` or `estimated`.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireChatResponse {
    pub content: String,
    pub mode: String,
    pub token_usage: WireTokenUsage,
    pub degraded: bool,
}

impl From<&ChatResult> for WireChatResponse {
    fn from(result: &ChatResult) -> Self {
        let usage = &result.token_usage;
        Self {
            content: result.content.clone(),
            mode: result.mode.as_str().to_string(),
            token_usage: WireTokenUsage {
                input: usage.usage.input_tokens,
                output: usage.usage.output_tokens,
                total: usage.usage.total_tokens,
                source: usage.source.as_str().to_string(),
            },
            degraded: result.is_degraded(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
    pub error: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl WireError {
    pub fn undecodable(detail: impl Into<String>) -> Self {
        Self {
            error: format!("Invalid request format: {}", detail.into()),
            kind: ChatErrorKind::InvalidInput.as_str().to_string(),
            index: None,
        }
    }
}

impl From<&ChatError> for WireError {
    fn from(error: &ChatError) -> Self {
        Self {
            error: error.message.clone(),
            kind: error.kind.as_str().to_string(),
            index: error.index,
        }
    }
}
