//! Prompted operations against the chat-completion provider: the concise
//! chat with its ordered model fallback, the task planner, and the email
//! drafter.

use crate::config::ModelConfig;
use crate::services::providers::{
    first_choice_text, ChatMessage, ChatProvider, ChatRequest,
};
use serde_json::Value;
use std::sync::Arc;

const CHAT_SYSTEM_PROMPT: &str = "You are Persona, a concise, friendly assistant. \
     Reply in under 3 lines, with clarity and encouragement.";

const TASKS_SYSTEM_PROMPT: &str = "You are Persona, an intelligent planner. \
     Output exactly 3 short bullet points, crisp and doable.";

const EMAIL_SYSTEM_PROMPT: &str = "You are Persona, a professional email assistant. \
     Write a concise reply under 100 words, with greeting and closing.";

/// A completed chat turn and the model that produced it.
#[derive(Debug)]
pub struct ChatTurn {
    pub reply: String,
    pub model: String,
}

/// One failed fallback attempt.
#[derive(Debug)]
pub struct AttemptFailure {
    pub model: String,
    pub reason: String,
}

/// Every model in the fallback list was tried once and none produced a
/// completion. Per-attempt reasons are kept for diagnosis.
#[derive(Debug)]
pub struct FallbackFailure {
    pub attempts: Vec<AttemptFailure>,
}

/// Raw upstream payload for a single-shot call that produced no completion.
#[derive(Debug)]
pub struct UpstreamRejection(pub Value);

pub struct Assistant {
    provider: Arc<dyn ChatProvider>,
    models: ModelConfig,
}

impl Assistant {
    pub fn new(provider: Arc<dyn ChatProvider>, models: ModelConfig) -> Self {
        Self { provider, models }
    }

    pub fn default_model(&self) -> &str {
        &self.models.default_model
    }

    /// Concise chat with ordered model fallback: one call per model, first
    /// body with a non-empty `choices` list wins.
    pub async fn ask(&self, message: &str) -> Result<ChatTurn, FallbackFailure> {
        let mut attempts = Vec::new();

        for model in &self.models.fallback_models {
            let request = ChatRequest {
                model: model.clone(),
                messages: vec![
                    ChatMessage::system(CHAT_SYSTEM_PROMPT),
                    ChatMessage::user(message),
                ],
                max_tokens: 80,
                temperature: 0.7,
                label: "Persona Chat".to_string(),
            };

            match self.provider.complete(&request).await {
                Ok(body) => match first_choice_text(&body) {
                    Some(reply) => {
                        return Ok(ChatTurn {
                            reply: reply.to_string(),
                            model: model.clone(),
                        });
                    }
                    None => attempts.push(AttemptFailure {
                        model: model.clone(),
                        reason: "response carried no completion".to_string(),
                    }),
                },
                Err(e) => attempts.push(AttemptFailure {
                    model: model.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        Err(FallbackFailure { attempts })
    }

    /// Generate 3 short actionable bullets for a goal. Single shot against
    /// the default model; the completion text is returned unparsed.
    pub async fn plan_tasks(&self, goal: &str) -> Result<String, UpstreamRejection> {
        self.single_shot(
            TASKS_SYSTEM_PROMPT,
            goal.to_string(),
            90,
            0.7,
            "Persona Task Generator",
        )
        .await
    }

    /// Draft a short professional reply to an email thread.
    pub async fn draft_reply(&self, thread: &str) -> Result<String, UpstreamRejection> {
        self.single_shot(
            EMAIL_SYSTEM_PROMPT,
            format!("Draft a reply for this thread:\n\n{}", thread),
            130,
            0.6,
            "Persona Email Writer",
        )
        .await
    }

    async fn single_shot(
        &self,
        system: &str,
        user_content: String,
        max_tokens: u32,
        temperature: f32,
        label: &str,
    ) -> Result<String, UpstreamRejection> {
        let request = ChatRequest {
            model: self.models.default_model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user_content)],
            max_tokens,
            temperature,
            label: label.to_string(),
        };

        match self.provider.complete(&request).await {
            Ok(body) => match first_choice_text(&body) {
                Some(text) => Ok(text.to_string()),
                None => Err(UpstreamRejection(body)),
            },
            Err(e) => Err(UpstreamRejection(e.to_payload())),
        }
    }
}
