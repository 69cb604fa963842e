#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use gtm_core::error::PlatformError;
use gtm_core::links::ConsoleLinks;
use gtm_core::platform::{ActorPlatform, CallOptions};
use gtm_core::run::{ActorInfo, JobRun, RunStatus};
use gtm_core::service::ConsultationService;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gtm_api::config::ServerConfig;
use gtm_api::router::build_app_router;
use gtm_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as the only CORS origin and the
/// `development` environment so internal error details are exposed.
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::from_lookup(|_| None).expect("defaults are valid");
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.cors_origins = vec!["http://localhost:3000".to_string()];
    config.request_timeout_secs = 30;
    config
}

/// Build the full application router around `platform`.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(platform: Arc<FakePlatform>) -> Router {
    build_test_app_with(platform, test_config())
}

pub fn build_test_app_with(platform: Arc<FakePlatform>, config: ServerConfig) -> Router {
    let consultations = Arc::new(ConsultationService::new(
        platform,
        config.apify.actor_settings(),
        ConsoleLinks::new(config.apify.console_url.clone()),
        config.confirm_new_consultation_default,
    ));
    let state = AppState {
        config: Arc::new(config.clone()),
        consultations,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fake platform
// ---------------------------------------------------------------------------

/// Scripted [`ActorPlatform`] that records the inputs it was called with.
pub struct FakePlatform {
    pub run: Result<JobRun, PlatformError>,
    pub items: Vec<Value>,
    pub output_record: Option<Value>,
    pub actor: Result<ActorInfo, PlatformError>,
    pub runs: Vec<JobRun>,
    pub inputs: Mutex<Vec<Value>>,
}

impl FakePlatform {
    /// A platform whose run finishes with `status` and yields `items`.
    pub fn finishing(status: RunStatus, items: Vec<Value>) -> Self {
        Self {
            run: Ok(run(status)),
            items,
            output_record: None,
            actor: Err(PlatformError::Transport("not scripted".into())),
            runs: Vec::new(),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// A platform whose actor call fails with `err`.
    pub fn failing(err: PlatformError) -> Self {
        Self {
            run: Err(err),
            ..Self::finishing(RunStatus::Succeeded, Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<Value> {
        self.inputs.lock().unwrap().clone()
    }
}

pub fn run(status: RunStatus) -> JobRun {
    JobRun {
        id: "run-xyz".into(),
        status,
        started_at: Some("2026-04-01T08:00:00Z".parse().unwrap()),
        finished_at: Some("2026-04-01T08:03:00Z".parse().unwrap()),
        status_message: None,
        default_dataset_id: Some("ds-xyz".into()),
        default_key_value_store_id: Some("kv-xyz".into()),
    }
}

#[async_trait]
impl ActorPlatform for FakePlatform {
    async fn call_actor(
        &self,
        _actor_id: &str,
        input: &Value,
        _options: CallOptions,
    ) -> Result<JobRun, PlatformError> {
        self.inputs.lock().unwrap().push(input.clone());
        self.run.clone()
    }

    async fn list_dataset_items(&self, _dataset_id: &str) -> Result<Vec<Value>, PlatformError> {
        Ok(self.items.clone())
    }

    async fn get_record(
        &self,
        _store_id: &str,
        _key: &str,
    ) -> Result<Option<Value>, PlatformError> {
        Ok(self.output_record.clone())
    }

    async fn get_actor(&self, _actor_id: &str) -> Result<ActorInfo, PlatformError> {
        self.actor.clone()
    }

    async fn list_runs(&self, _actor_id: &str, limit: u32) -> Result<Vec<JobRun>, PlatformError> {
        Ok(self.runs.iter().take(limit as usize).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected HTTP status");
}
