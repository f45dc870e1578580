use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::startup::AppState;

/// Liveness plus a snapshot of the session counters.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.memory.snapshot();

    Json(json!({
        "ok": true,
        "model": state.assistant.default_model(),
        "xp": snapshot.xp,
        "last_chat": snapshot.last_chat,
        "last_tasks": snapshot.last_tasks,
    }))
}
