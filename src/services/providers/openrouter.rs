//! OpenRouter chat-completion provider.

use super::{ChatProvider, ChatRequest, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// OpenRouter API base URL.
const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Hard deadline for one upstream call.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// OpenRouter provider configuration.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub referer: String,
}

pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    pub fn new(config: OpenRouterConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<Value, ProviderError> {
        let body = json!({
            "model": request.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        tracing::debug!(
            model = %request.model,
            label = %request.label,
            "Sending request to OpenRouter"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", OPENROUTER_API_BASE))
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &request.label)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        // The status line is deliberately not checked: error bodies must
        // reach the caller unmodified so they can be relayed to the client.
        response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to decode response: {}", e)))
    }
}
