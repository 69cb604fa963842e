use std::sync::Arc;

use gtm_core::error::ConsultationError;
use gtm_core::service::ConsultationService;

use crate::config::ServerConfig;
use crate::error::AppError;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Consultation pipeline bound to the platform client.
    pub consultations: Arc<ConsultationService>,
}

impl AppState {
    /// Convert a domain error into an HTTP error, keeping internal details
    /// only outside production.
    pub fn reject(&self, err: ConsultationError) -> AppError {
        match err {
            ConsultationError::Internal(detail) if self.config.expose_error_details() => {
                AppError::InternalDetailed(detail)
            }
            other => AppError::Consultation(other),
        }
    }
}
