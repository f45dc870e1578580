use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::services::memory::HistoryView;
use crate::startup::AppState;

/// Return the most recent window of each history log for the sidebar.
pub async fn get_history(State(state): State<AppState>) -> Json<HistoryView> {
    Json(state.memory.recent_history())
}

/// Clear all history logs (demo reset).
#[tracing::instrument(skip(state))]
pub async fn clear_history(State(state): State<AppState>) -> Json<Value> {
    state.memory.clear_history();
    tracing::info!("History cleared");
    Json(json!({ "ok": true }))
}
