//! Route definitions for the read-only actor views.

use axum::routing::get;
use axum::Router;

use crate::handlers::actor;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET    /actor-status       -> actor_status
/// GET    /recent-runs        -> recent_runs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/actor-status", get(actor::actor_status))
        .route("/recent-runs", get(actor::recent_runs))
}
