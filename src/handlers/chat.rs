use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub reply: String,
    pub model: String,
}

/// Concise chat with model fallback; stores the turn in history.
#[tracing::instrument(skip(state, request))]
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Empty message".to_string()));
    }

    state.memory.note_chat_prompt(message);

    let turn = state.assistant.ask(message).await?;
    state.memory.record_chat(message, &turn.reply);

    tracing::info!(model = %turn.model, "Chat reply served");

    Ok(Json(AskResponse {
        reply: turn.reply,
        model: turn.model,
    }))
}
