//! Scripted provider for testing.

use super::{ChatProvider, ChatRequest, ProviderError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the mock does when a given model is requested.
enum MockOutcome {
    /// A well-formed completion carrying this text.
    Reply(String),
    /// A decoded body without `choices`, as the upstream reports errors.
    Reject(Value),
}

/// Scripted chat provider. Models without a scripted outcome fail at the
/// transport level; every call is counted.
#[derive(Default)]
pub struct MockChatProvider {
    outcomes: HashMap<String, MockOutcome>,
    calls: AtomicUsize,
}

impl MockChatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful completion for `model`.
    pub fn with_reply(mut self, model: &str, text: &str) -> Self {
        self.outcomes
            .insert(model.to_string(), MockOutcome::Reply(text.to_string()));
        self
    }

    /// Script an upstream-reported error body for `model`.
    pub fn with_rejection(mut self, model: &str, payload: Value) -> Self {
        self.outcomes
            .insert(model.to_string(), MockOutcome::Reject(payload));
        self
    }

    /// Number of calls made so far, across all models.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.outcomes.get(&request.model) {
            Some(MockOutcome::Reply(text)) => Ok(json!({
                "model": request.model,
                "choices": [{"message": {"role": "assistant", "content": text}}],
            })),
            Some(MockOutcome::Reject(payload)) => Ok(payload.clone()),
            None => Err(ProviderError::ApiError(format!(
                "no scripted outcome for model {}",
                request.model
            ))),
        }
    }
}
