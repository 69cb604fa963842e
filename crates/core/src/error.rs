use serde::Serialize;

use crate::run::RunStatus;

/// Diagnostic details for a run that finished without a usable result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFailure {
    pub run_id: String,
    pub status: RunStatus,
    pub status_message: Option<String>,
    pub console_url: String,
    pub dataset_url: Option<String>,
}

/// Every way a consultation can fail, as seen by the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConsultationError {
    #[error("Missing required fields: {}", .missing_fields.join(", "))]
    Validation { missing_fields: Vec<&'static str> },

    #[error("Platform rejected credentials: {0}")]
    RemoteAuth(String),

    #[error("Actor not found: {0}")]
    RemoteNotFound(String),

    #[error("Platform unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Run {} finished with status {}", .0.run_id, .0.status)]
    JobTerminal(Box<RunFailure>),

    #[error("Run {} succeeded but produced no output records", .0.run_id)]
    NoResult(Box<RunFailure>),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure reported by an [`ActorPlatform`](crate::platform::ActorPlatform)
/// implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlatformError {
    /// The platform answered with a non-success HTTP status.
    #[error("Platform API error ({status}): {message}")]
    Api {
        status: u16,
        error_type: Option<String>,
        message: String,
    },

    /// The request never produced a response (network, DNS, TLS, ...).
    #[error("Platform transport error: {0}")]
    Transport(String),

    /// A response arrived but could not be decoded.
    #[error("Malformed platform response: {0}")]
    Decode(String),

    /// The run handle stopped resolving while waiting for it to finish.
    #[error("Run {run_id} is no longer available: {message}")]
    RunLost { run_id: String, message: String },

    /// The run did not reach a terminal status before the local wait ended.
    #[error("Run {run_id} did not finish within {waited_secs}s")]
    DeadlineExceeded { run_id: String, waited_secs: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields() {
        let err = ConsultationError::Validation {
            missing_fields: vec!["client_name", "business_stage"],
        };
        assert_eq!(
            err.to_string(),
            "Missing required fields: client_name, business_stage"
        );
    }

    #[test]
    fn terminal_message_names_run_and_status() {
        let err = ConsultationError::JobTerminal(Box::new(RunFailure {
            run_id: "run-9".into(),
            status: RunStatus::Aborted,
            status_message: None,
            console_url: "https://console/actors/runs/run-9".into(),
            dataset_url: None,
        }));
        assert_eq!(err.to_string(), "Run run-9 finished with status ABORTED");
    }

    #[test]
    fn platform_api_error_display() {
        let err = PlatformError::Api {
            status: 404,
            error_type: Some("record-not-found".into()),
            message: "Actor was not found".into(),
        };
        assert_eq!(err.to_string(), "Platform API error (404): Actor was not found");
    }
}
