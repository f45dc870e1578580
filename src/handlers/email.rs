use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct DraftEmailRequest {
    #[serde(default)]
    pub thread: String,
}

#[derive(Debug, Serialize)]
pub struct DraftEmailResponse {
    pub draft: String,
}

/// Generate a short professional email reply; stores it in history.
#[tracing::instrument(skip(state, request))]
pub async fn draft_email(
    State(state): State<AppState>,
    Json(request): Json<DraftEmailRequest>,
) -> Result<Json<DraftEmailResponse>, AppError> {
    let thread = request.thread.trim();
    if thread.is_empty() {
        return Err(AppError::BadRequest("Empty thread".to_string()));
    }

    // The thread becomes the latest prompt, same as the chat endpoint.
    state.memory.note_chat_prompt(thread);

    let draft = state
        .assistant
        .draft_reply(thread)
        .await
        .map_err(|rejection| AppError::UpstreamRejected(rejection.0))?;

    state.memory.record_email(thread, &draft);

    tracing::info!("Email draft generated");

    Ok(Json(DraftEmailResponse { draft }))
}
