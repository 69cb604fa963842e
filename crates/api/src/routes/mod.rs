pub mod actor;
pub mod consultation;
pub mod health;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Endpoints advertised by the 404 fallback.
pub const AVAILABLE_ENDPOINTS: [&str; 4] = [
    "GET /health - Health check",
    "POST /api/gtm-consultation - GTM consultation",
    "GET /api/actor-status - Check actor status",
    "GET /api/recent-runs - List recent runs",
];

/// Build the `/api` route tree.
///
/// A known path with an unsupported method gets the same JSON 404 as an
/// unknown path.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(consultation::router())
        .merge(actor::router())
        .method_not_allowed_fallback(not_found)
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Endpoint not found",
            "availableEndpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}
