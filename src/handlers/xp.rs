use axum::{extract::State, Json};
use serde::Deserialize;

use crate::services::memory::XpAward;
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct XpRequest {
    pub action: Option<String>,
}

/// Add XP for a client-declared action and return the running total.
#[tracing::instrument(skip(state, request))]
pub async fn xp_update(
    State(state): State<AppState>,
    Json(request): Json<XpRequest>,
) -> Json<XpAward> {
    let award = state.memory.award_xp(request.action.as_deref());

    tracing::debug!(
        action = %award.action,
        gained = award.xp_gained,
        total = award.total_xp,
        "XP awarded"
    );

    Json(award)
}
