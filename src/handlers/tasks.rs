use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::startup::AppState;

const DEFAULT_GOAL: &str = "Plan my day effectively";

#[derive(Debug, Deserialize)]
pub struct CreateTasksRequest {
    pub goal: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTasksResponse {
    pub tasks: String,
}

/// Generate 3 short actionable bullets; stores them in history.
#[tracing::instrument(skip(state, request))]
pub async fn create_tasks(
    State(state): State<AppState>,
    Json(request): Json<CreateTasksRequest>,
) -> Result<Json<CreateTasksResponse>, AppError> {
    let goal = request.goal.as_deref().unwrap_or(DEFAULT_GOAL).trim();

    let items = state
        .assistant
        .plan_tasks(goal)
        .await
        .map_err(|rejection| AppError::UpstreamRejected(rejection.0))?;

    state.memory.record_tasks(goal, &items);

    tracing::info!(goal = %goal, "Task list generated");

    Ok(Json(CreateTasksResponse { tasks: items }))
}
