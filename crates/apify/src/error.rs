use gtm_core::error::PlatformError;
use serde::Deserialize;

/// Errors from the Apify REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApifyError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Apify returned a non-2xx status code.
    #[error("Apify API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable `error.type` from the body, when present.
        error_type: Option<String>,
        /// `error.message` from the body, or the raw body text.
        message: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode Apify response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The run handle returned 404 while polling.
    #[error("Run {run_id} is no longer available: {message}")]
    RunLost { run_id: String, message: String },

    /// The run was still going when the local wait ran out.
    #[error("Run {run_id} did not finish within {waited_secs}s")]
    WaitExceeded { run_id: String, waited_secs: u64 },
}

impl From<ApifyError> for PlatformError {
    fn from(err: ApifyError) -> Self {
        match err {
            ApifyError::Request(e) => PlatformError::Transport(e.to_string()),
            ApifyError::Api {
                status,
                error_type,
                message,
            } => PlatformError::Api {
                status,
                error_type,
                message,
            },
            ApifyError::Decode(e) => PlatformError::Decode(e.to_string()),
            ApifyError::RunLost { run_id, message } => PlatformError::RunLost { run_id, message },
            ApifyError::WaitExceeded {
                run_id,
                waited_secs,
            } => PlatformError::DeadlineExceeded {
                run_id,
                waited_secs,
            },
        }
    }
}

/// `{"error": {"type": "...", "message": "..."}}` body of a failed call.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: Option<String>,
}

impl ApifyError {
    /// Build an [`ApifyError::Api`] from a status code and raw body.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ApifyError::Api {
                status,
                message: parsed
                    .error
                    .message
                    .unwrap_or_else(|| body.to_string()),
                error_type: parsed.error.error_type,
            },
            Err(_) => ApifyError::Api {
                status,
                error_type: None,
                message: body.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_structured_error_body() {
        let err = ApifyError::from_body(
            404,
            r#"{"error":{"type":"record-not-found","message":"Actor was not found"}}"#,
        );
        assert_matches!(
            err,
            ApifyError::Api { status: 404, error_type: Some(ref t), ref message }
                if t == "record-not-found" && message == "Actor was not found"
        );
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = ApifyError::from_body(502, "<html>Bad gateway</html>");
        assert_matches!(
            err,
            ApifyError::Api { status: 502, error_type: None, ref message }
                if message == "<html>Bad gateway</html>"
        );
    }

    #[test]
    fn converts_into_platform_error() {
        let err: PlatformError = ApifyError::WaitExceeded {
            run_id: "r".into(),
            waited_secs: 5,
        }
        .into();
        assert_eq!(
            err,
            PlatformError::DeadlineExceeded {
                run_id: "r".into(),
                waited_secs: 5
            }
        );
    }

    #[test]
    fn request_error_becomes_transport() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err: PlatformError = ApifyError::Request(req_err).into();
        assert_matches!(err, PlatformError::Transport(_));
    }
}
