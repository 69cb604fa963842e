//! Handler for `POST /api/gtm-consultation`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use gtm_core::mapper::ConsultationReport;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/gtm-consultation
///
/// Validates the submission, runs the consultant actor and waits for it.
/// The request stays open for the whole run (up to the actor timeout).
pub async fn create_consultation(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ConsultationReport>> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    tracing::info!(actor_id = %state.consultations.actor_id(), "GTM consultation request received");

    let report = state
        .consultations
        .consult(&payload)
        .await
        .map_err(|e| state.reject(e))?;

    tracing::info!(run_id = %report.run_id, "Sending consultation result");
    Ok(Json(report))
}
