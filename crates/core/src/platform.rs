//! Capability trait over the remote automation platform.
//!
//! The HTTP layer holds an `Arc<dyn ActorPlatform>` so tests can swap the
//! real Apify client for a scripted fake.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::PlatformError;
use crate::run::{ActorInfo, JobRun};

/// Resource hints passed through to the platform when starting a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    /// Run timeout enforced by the platform.
    pub timeout: Duration,
    /// Memory allocation in megabytes. Not interpreted locally.
    pub memory_mbytes: u32,
}

/// Operations the gateway needs from the automation platform.
#[async_trait]
pub trait ActorPlatform: Send + Sync {
    /// Start a run of `actor_id` and wait until it reaches a terminal status.
    async fn call_actor(
        &self,
        actor_id: &str,
        input: &Value,
        options: CallOptions,
    ) -> Result<JobRun, PlatformError>;

    /// All records of a dataset, in insertion order.
    async fn list_dataset_items(&self, dataset_id: &str) -> Result<Vec<Value>, PlatformError>;

    /// A single key-value store record, `None` when the key does not exist.
    async fn get_record(&self, store_id: &str, key: &str)
        -> Result<Option<Value>, PlatformError>;

    /// Actor definition metadata.
    async fn get_actor(&self, actor_id: &str) -> Result<ActorInfo, PlatformError>;

    /// Most recent runs of an actor, newest first.
    async fn list_runs(&self, actor_id: &str, limit: u32) -> Result<Vec<JobRun>, PlatformError>;
}
