use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gtm_core::error::{ConsultationError, RunFailure};
use gtm_core::run::RunStatus;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ConsultationError`] for domain errors and adds HTTP-specific
/// variants. Every variant renders as a `{ "success": false, ... }` JSON
/// envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `gtm_core`.
    #[error(transparent)]
    Consultation(#[from] ConsultationError),

    /// A malformed request that never reached validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error whose detail may be shown to the caller.
    #[error("Internal error: {0}")]
    InternalDetailed(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Consultation(err) => consultation_body(err),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "code": "BAD_REQUEST",
                    "message": "Invalid request body",
                    "error": msg,
                }),
            ),
            AppError::InternalDetailed(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_body(msg)
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn consultation_body(err: ConsultationError) -> (StatusCode, serde_json::Value) {
    match err {
        ConsultationError::Validation { missing_fields } => (
            StatusCode::BAD_REQUEST,
            json!({
                "success": false,
                "code": "VALIDATION_ERROR",
                "error": "Missing required fields",
                "missingFields": missing_fields,
                "message": "Please provide all required fields for GTM consultation",
            }),
        ),
        ConsultationError::RemoteAuth(msg) => (
            StatusCode::UNAUTHORIZED,
            json!({
                "success": false,
                "code": "UNAUTHORIZED",
                "message": "Unauthorized access to Apify. Check API token.",
                "error": msg,
            }),
        ),
        ConsultationError::RemoteNotFound(msg) => (
            StatusCode::NOT_FOUND,
            json!({
                "success": false,
                "code": "ACTOR_NOT_FOUND",
                "message": "GTM Alpha Consultant actor not found",
                "error": msg,
            }),
        ),
        ConsultationError::RemoteUnavailable(msg) => {
            tracing::warn!(error = %msg, "Platform under maintenance");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "success": false,
                    "code": "UNDER_MAINTENANCE",
                    "message": "GTM Alpha Consultant is currently under maintenance. Please try again later.",
                    "error": "UNDER_MAINTENANCE",
                }),
            )
        }
        ConsultationError::JobTerminal(failure) => {
            tracing::error!(
                run_id = %failure.run_id,
                status = %failure.status,
                status_message = ?failure.status_message,
                "Actor run did not succeed",
            );
            let message = terminal_message(failure.status);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                run_failure_body("JOB_FAILED", message, *failure),
            )
        }
        ConsultationError::NoResult(failure) => {
            tracing::error!(run_id = %failure.run_id, "Actor run produced no output records");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                run_failure_body(
                    "NO_RESULT",
                    "GTM consultation completed but produced no results",
                    *failure,
                ),
            )
        }
        ConsultationError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal consultation error");
            internal_body("An internal error occurred".to_string())
        }
    }
}

fn terminal_message(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Failed => "GTM consultation failed",
        RunStatus::Aborted => "GTM consultation was aborted",
        RunStatus::TimedOut => "GTM consultation timed out",
        _ => "GTM consultation completed with unexpected status",
    }
}

fn run_failure_body(code: &str, message: &str, failure: RunFailure) -> serde_json::Value {
    json!({
        "success": false,
        "code": code,
        "message": message,
        "status": failure.status,
        "error": failure.status_message,
        "runId": failure.run_id,
        "consoleUrl": failure.console_url,
        "datasetUrl": failure.dataset_url,
        "timestamp": chrono::Utc::now(),
    })
}

fn internal_body(error: String) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "success": false,
            "code": "INTERNAL_ERROR",
            "message": "Internal server error during GTM consultation",
            "error": error,
        }),
    )
}
