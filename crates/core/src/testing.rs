//! Fixtures shared by unit tests in this crate.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::TimeZone;
use serde_json::Value;

use crate::error::PlatformError;
use crate::platform::{ActorPlatform, CallOptions};
use crate::run::{ActorInfo, JobRun, RunStatus};
use crate::types::Timestamp;

pub fn fixed_time() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// A run with `run-1`/`ds-1`/`kv-1` handles that took 90 seconds.
pub fn run_with_status(status: RunStatus) -> JobRun {
    JobRun {
        id: "run-1".into(),
        status,
        started_at: Some(fixed_time()),
        finished_at: Some(fixed_time() + chrono::Duration::seconds(90)),
        status_message: None,
        default_dataset_id: Some("ds-1".into()),
        default_key_value_store_id: Some("kv-1".into()),
    }
}

/// Scripted platform that records every call.
pub struct StubPlatform {
    pub call_result: Result<JobRun, PlatformError>,
    pub items: Result<Vec<Value>, PlatformError>,
    pub record: Result<Option<Value>, PlatformError>,
    pub calls: Mutex<Vec<(String, Value, CallOptions)>>,
    pub lookups: Mutex<Vec<String>>,
}

impl StubPlatform {
    pub fn new(call_result: Result<JobRun, PlatformError>, items: Vec<Value>) -> Self {
        Self {
            call_result,
            items: Ok(items),
            record: Ok(None),
            calls: Mutex::new(Vec::new()),
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ActorPlatform for StubPlatform {
    async fn call_actor(
        &self,
        actor_id: &str,
        input: &Value,
        options: CallOptions,
    ) -> Result<JobRun, PlatformError> {
        self.calls
            .lock()
            .unwrap()
            .push((actor_id.to_string(), input.clone(), options));
        self.call_result.clone()
    }

    async fn list_dataset_items(&self, dataset_id: &str) -> Result<Vec<Value>, PlatformError> {
        self.lookups
            .lock()
            .unwrap()
            .push(format!("dataset:{dataset_id}"));
        self.items.clone()
    }

    async fn get_record(
        &self,
        store_id: &str,
        key: &str,
    ) -> Result<Option<Value>, PlatformError> {
        self.lookups
            .lock()
            .unwrap()
            .push(format!("record:{store_id}/{key}"));
        self.record.clone()
    }

    async fn get_actor(&self, actor_id: &str) -> Result<ActorInfo, PlatformError> {
        Err(PlatformError::Api {
            status: 404,
            error_type: Some("record-not-found".into()),
            message: format!("Actor {actor_id} was not found"),
        })
    }

    async fn list_runs(&self, _actor_id: &str, _limit: u32) -> Result<Vec<JobRun>, PlatformError> {
        Ok(Vec::new())
    }
}
