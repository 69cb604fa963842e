//! Success envelopes for the auxiliary read endpoints.
//!
//! Consultation results have their own envelope
//! ([`ConsultationReport`](gtm_core::mapper::ConsultationReport)); errors are
//! rendered by [`AppError`](crate::error::AppError).

use gtm_core::run::ActorInfo;
use gtm_core::service::RunSummary;
use serde::Serialize;

/// `GET /api/actor-status` body.
#[derive(Debug, Serialize)]
pub struct ActorStatusResponse {
    pub success: bool,
    pub actor: ActorInfo,
}

/// `GET /api/recent-runs` body.
#[derive(Debug, Serialize)]
pub struct RecentRunsResponse {
    pub success: bool,
    pub runs: Vec<RunSummary>,
}
