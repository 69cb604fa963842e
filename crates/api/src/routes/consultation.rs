//! Route definitions for the consultation endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::consultation;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST   /gtm-consultation   -> create_consultation
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/gtm-consultation", post(consultation::create_consultation))
}
