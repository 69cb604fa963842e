//! HTTP client for the Apify REST API v2.

use std::time::Duration;

use async_trait::async_trait;
use gtm_core::error::PlatformError;
use gtm_core::platform::{ActorPlatform, CallOptions};
use gtm_core::run::{ActorInfo, JobRun};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::Instant;

use crate::error::ApifyError;

/// Public Apify API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

/// Longest server-side wait Apify accepts for `waitForFinish`.
const MAX_WAIT_CHUNK_SECS: u64 = 60;

/// Extra local wait on top of the run timeout before giving up.
const DEFAULT_WAIT_GRACE: Duration = Duration::from_secs(60);

/// Per-request HTTP timeout. Must exceed one `waitForFinish` chunk.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(MAX_WAIT_CHUNK_SECS + 30);

/// `{"data": ...}` envelope used by most Apify endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Paginated list payload.
#[derive(Debug, Deserialize)]
struct Page<T> {
    items: Vec<T>,
}

/// Client for one Apify account.
///
/// Cheap to share behind an `Arc`; the inner [`reqwest::Client`] pools
/// connections across concurrent requests.
pub struct ApifyClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    wait_grace: Duration,
}

impl ApifyClient {
    /// Create a client against `base_url` (e.g. [`DEFAULT_BASE_URL`]).
    ///
    /// Without a token every call is anonymous and Apify will usually
    /// answer 401.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ApifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url, token))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            wait_grace: DEFAULT_WAIT_GRACE,
        }
    }

    /// Override how long to keep waiting after the run timeout has passed.
    pub fn with_wait_grace(mut self, grace: Duration) -> Self {
        self.wait_grace = grace;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Start a run without waiting for it.
    ///
    /// Sends `POST /acts/{actor}/runs` with the input as JSON body.
    pub async fn start_run(
        &self,
        actor_id: &str,
        input: &Value,
        options: CallOptions,
    ) -> Result<JobRun, ApifyError> {
        let response = self
            .request(Method::POST, &format!("/acts/{}/runs", actor_path(actor_id)))
            .query(&[
                ("timeout", options.timeout.as_secs().to_string()),
                ("memory", options.memory_mbytes.to_string()),
            ])
            .json(input)
            .send()
            .await?;

        let envelope: Envelope<JobRun> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Fetch a run, letting the server hold the request up to `wait_secs`
    /// for it to finish.
    pub async fn get_run(&self, run_id: &str, wait_secs: u64) -> Result<JobRun, ApifyError> {
        let response = self
            .request(Method::GET, &format!("/actor-runs/{run_id}"))
            .query(&[("waitForFinish", wait_secs.min(MAX_WAIT_CHUNK_SECS).to_string())])
            .send()
            .await?;

        let envelope: Envelope<JobRun> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Poll a run until it reaches a terminal status or `max_wait` elapses.
    ///
    /// A 404 while polling is reported as [`ApifyError::RunLost`], since the
    /// actor itself was found when the run started.
    pub async fn wait_for_finish(&self, run: JobRun, max_wait: Duration) -> Result<JobRun, ApifyError> {
        let started = Instant::now();
        let mut run = run;

        loop {
            if run.status.is_terminal() {
                return Ok(run);
            }

            let elapsed = started.elapsed();
            if elapsed >= max_wait {
                tracing::warn!(run_id = %run.id, status = %run.status, "Gave up waiting for run");
                return Err(ApifyError::WaitExceeded {
                    run_id: run.id,
                    waited_secs: elapsed.as_secs(),
                });
            }

            let remaining = (max_wait - elapsed).as_secs().max(1);
            tracing::debug!(run_id = %run.id, status = %run.status, remaining, "Waiting for run");
            run = match self.get_run(&run.id, remaining).await {
                Ok(next) => next,
                Err(ApifyError::Api {
                    status: 404,
                    message,
                    ..
                }) => {
                    tracing::error!(run_id = %run.id, %message, "Run disappeared while waiting");
                    return Err(ApifyError::RunLost {
                        run_id: run.id,
                        message,
                    });
                }
                Err(e) => return Err(e),
            };
        }
    }

    /// Start a run and wait for it to finish.
    pub async fn call(
        &self,
        actor_id: &str,
        input: &Value,
        options: CallOptions,
    ) -> Result<JobRun, ApifyError> {
        let run = self.start_run(actor_id, input, options).await?;
        tracing::info!(run_id = %run.id, actor_id, "Actor run started");
        self.wait_for_finish(run, options.timeout + self.wait_grace).await
    }

    /// Sends `GET /datasets/{id}/items` and returns the records.
    pub async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<Value>, ApifyError> {
        let response = self
            .request(Method::GET, &format!("/datasets/{dataset_id}/items"))
            .query(&[("format", "json"), ("clean", "true")])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Sends `GET /key-value-stores/{id}/records/{key}`.
    ///
    /// A 404 means the key is absent. Bodies that are not JSON are returned
    /// as a JSON string.
    pub async fn record(&self, store_id: &str, key: &str) -> Result<Option<Value>, ApifyError> {
        let response = self
            .request(
                Method::GET,
                &format!("/key-value-stores/{store_id}/records/{key}"),
            )
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        let value = serde_json::from_str(&body).unwrap_or(Value::String(body));
        Ok(Some(value))
    }

    /// Sends `GET /acts/{actor}`.
    pub async fn actor(&self, actor_id: &str) -> Result<ActorInfo, ApifyError> {
        let response = self
            .request(Method::GET, &format!("/acts/{}", actor_path(actor_id)))
            .send()
            .await?;

        let envelope: Envelope<ActorInfo> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Sends `GET /acts/{actor}/runs?desc=true`.
    pub async fn runs(&self, actor_id: &str, limit: u32) -> Result<Vec<JobRun>, ApifyError> {
        let response = self
            .request(Method::GET, &format!("/acts/{}/runs", actor_path(actor_id)))
            .query(&[("limit", limit.to_string()), ("desc", "true".to_string())])
            .send()
            .await?;

        let envelope: Envelope<Page<JobRun>> = Self::parse_response(response).await?;
        Ok(envelope.data.items)
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Return the response unchanged on success, or an
    /// [`ApifyError::Api`] built from the error body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApifyError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApifyError::from_body(status.as_u16(), &body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApifyError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Apify addresses `user/actor` as `user~actor` in URL paths.
fn actor_path(actor_id: &str) -> String {
    actor_id.replace('/', "~")
}

#[async_trait]
impl ActorPlatform for ApifyClient {
    async fn call_actor(
        &self,
        actor_id: &str,
        input: &Value,
        options: CallOptions,
    ) -> Result<JobRun, PlatformError> {
        Ok(self.call(actor_id, input, options).await?)
    }

    async fn list_dataset_items(&self, dataset_id: &str) -> Result<Vec<Value>, PlatformError> {
        Ok(self.dataset_items(dataset_id).await?)
    }

    async fn get_record(
        &self,
        store_id: &str,
        key: &str,
    ) -> Result<Option<Value>, PlatformError> {
        Ok(self.record(store_id, key).await?)
    }

    async fn get_actor(&self, actor_id: &str) -> Result<ActorInfo, PlatformError> {
        Ok(self.actor(actor_id).await?)
    }

    async fn list_runs(&self, actor_id: &str, limit: u32) -> Result<Vec<JobRun>, PlatformError> {
        Ok(self.runs(actor_id, limit).await?)
    }
}
