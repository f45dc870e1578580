//! Chat-completion provider abstraction.
//!
//! The trait hands back the decoded upstream body as-is; callers decide
//! whether it carries a usable completion. This keeps the error payloads the
//! upstream reports flowing through to clients unmodified.

pub mod mock;
pub mod openrouter;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Error type for provider operations. Covers transport-level faults only;
/// upstream-reported errors arrive as a normal decoded body.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

impl ProviderError {
    /// The payload shape the upstream uses for its own failures, so transport
    /// faults relay the same way as API rejections.
    pub fn to_payload(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat-completion call: model, conversation, sampling parameters, and a
/// label forwarded as the `X-Title` attribution header.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub label: String,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one request. `Ok` carries the decoded upstream body whether or
    /// not it contains a completion; `Err` is transport failure only.
    async fn complete(&self, request: &ChatRequest) -> Result<Value, ProviderError>;
}

/// Extract the first choice's message content, if the body carries one.
pub fn first_choice_text(body: &Value) -> Option<&str> {
    body.get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
}
