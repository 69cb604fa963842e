//! Read-only pass-through views of the consultant actor.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::response::{ActorStatusResponse, RecentRunsResponse};
use crate::state::AppState;

/// GET /api/actor-status
///
/// Metadata of the configured actor as the platform reports it.
pub async fn actor_status(State(state): State<AppState>) -> AppResult<Json<ActorStatusResponse>> {
    let actor = state
        .consultations
        .actor_info()
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(ActorStatusResponse {
        success: true,
        actor,
    }))
}

/// GET /api/recent-runs
///
/// The ten most recent runs of the configured actor, newest first.
pub async fn recent_runs(State(state): State<AppState>) -> AppResult<Json<RecentRunsResponse>> {
    let runs = state
        .consultations
        .recent_runs()
        .await
        .map_err(|e| state.reject(e))?;

    tracing::debug!(count = runs.len(), "Fetched recent runs");
    Ok(Json(RecentRunsResponse {
        success: true,
        runs,
    }))
}
