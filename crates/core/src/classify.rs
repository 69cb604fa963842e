//! Classification of platform failures into the consultation error taxonomy.
//!
//! Structured signals (deadline, error type, HTTP status) win over message
//! text. Anything that matches neither becomes
//! [`ConsultationError::Internal`].

use crate::error::{ConsultationError, PlatformError, RunFailure};
use crate::links::ConsoleLinks;
use crate::run::RunStatus;

/// Marker the platform uses for planned downtime.
pub const UNDER_MAINTENANCE: &str = "UNDER_MAINTENANCE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoteKind {
    Auth,
    NotFound,
    Unavailable,
}

/// Map a platform failure onto a [`ConsultationError`].
pub fn classify_platform_error(err: &PlatformError, links: &ConsoleLinks) -> ConsultationError {
    if let PlatformError::DeadlineExceeded {
        run_id,
        waited_secs,
    } = err
    {
        return ConsultationError::JobTerminal(Box::new(RunFailure {
            run_id: run_id.clone(),
            status: RunStatus::TimedOut,
            status_message: Some(format!("Run did not finish within {waited_secs} seconds")),
            console_url: links.run(run_id),
            dataset_url: None,
        }));
    }

    let message = err.to_string();
    // The actor existed when the run started, so a vanished run is never a
    // missing actor.
    if matches!(err, PlatformError::RunLost { .. }) {
        return ConsultationError::Internal(message);
    }

    match structured_kind(err).or_else(|| message_kind(&message)) {
        Some(RemoteKind::Auth) => ConsultationError::RemoteAuth(message),
        Some(RemoteKind::NotFound) => ConsultationError::RemoteNotFound(message),
        Some(RemoteKind::Unavailable) => ConsultationError::RemoteUnavailable(message),
        None => ConsultationError::Internal(message),
    }
}

fn structured_kind(err: &PlatformError) -> Option<RemoteKind> {
    let PlatformError::Api {
        status, error_type, ..
    } = err
    else {
        return None;
    };

    match error_type.as_deref() {
        Some(t) if t.eq_ignore_ascii_case(UNDER_MAINTENANCE) => {
            return Some(RemoteKind::Unavailable)
        }
        Some("token-not-provided" | "user-or-token-not-found") => return Some(RemoteKind::Auth),
        _ => {}
    }

    match status {
        401 => Some(RemoteKind::Auth),
        404 => Some(RemoteKind::NotFound),
        503 => Some(RemoteKind::Unavailable),
        _ => None,
    }
}

fn message_kind(message: &str) -> Option<RemoteKind> {
    if message.contains("Actor not found") {
        Some(RemoteKind::NotFound)
    } else if message.contains(UNDER_MAINTENANCE) {
        Some(RemoteKind::Unavailable)
    } else if message.contains("Unauthorized") {
        Some(RemoteKind::Auth)
    } else {
        None
    }
}
