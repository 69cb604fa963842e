//! Submits consultations to the remote actor and gathers its outputs.

use std::sync::Arc;
use std::time::Duration;

use crate::classify::classify_platform_error;
use crate::consultation::ConsultationRequest;
use crate::error::{ConsultationError, PlatformError};
use crate::links::ConsoleLinks;
use crate::mapper::RunOutputs;
use crate::platform::{ActorPlatform, CallOptions};
use crate::run::{JobRun, RunStatus};

/// Key of the rendered report in the run's key-value store.
pub const OUTPUT_RECORD_KEY: &str = "OUTPUT";

/// Default consultant actor.
pub const DEFAULT_ACTOR_ID: &str = "shashghosh/gtm-alpha-consultant";

/// Which actor to run and with which resource hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSettings {
    pub actor_id: String,
    pub timeout: Duration,
    pub memory_mbytes: u32,
}

impl Default for ActorSettings {
    fn default() -> Self {
        Self {
            actor_id: DEFAULT_ACTOR_ID.to_string(),
            timeout: Duration::from_secs(600),
            memory_mbytes: 256,
        }
    }
}

/// Runs one actor job per consultation. Never retries.
pub struct JobInvoker {
    platform: Arc<dyn ActorPlatform>,
    settings: ActorSettings,
    links: ConsoleLinks,
}

impl JobInvoker {
    pub fn new(platform: Arc<dyn ActorPlatform>, settings: ActorSettings, links: ConsoleLinks) -> Self {
        Self {
            platform,
            settings,
            links,
        }
    }

    pub fn settings(&self) -> &ActorSettings {
        &self.settings
    }

    /// Start the actor with the request as input and wait for it to finish.
    pub async fn invoke(&self, request: &ConsultationRequest) -> Result<JobRun, ConsultationError> {
        let input = serde_json::to_value(request)
            .map_err(|e| ConsultationError::Internal(format!("Failed to encode actor input: {e}")))?;

        let options = CallOptions {
            timeout: self.settings.timeout,
            memory_mbytes: self.settings.memory_mbytes,
        };

        tracing::info!(
            actor_id = %self.settings.actor_id,
            timeout_secs = options.timeout.as_secs(),
            memory_mbytes = options.memory_mbytes,
            "Calling actor",
        );

        let run = self
            .platform
            .call_actor(&self.settings.actor_id, &input, options)
            .await
            .map_err(|e| {
                tracing::error!(actor_id = %self.settings.actor_id, error = %e, "Actor call failed");
                classify_platform_error(&e, &self.links)
            })?;

        tracing::info!(
            run_id = %run.id,
            status = %run.status,
            started_at = ?run.started_at,
            finished_at = ?run.finished_at,
            "Actor run completed",
        );

        Ok(run)
    }

    /// Read the dataset and the `OUTPUT` record of a succeeded run.
    ///
    /// Returns empty outputs for any other status. A failing `OUTPUT`
    /// lookup is logged and ignored. A dataset that no longer exists reads
    /// as empty; any other dataset failure is an error.
    pub async fn collect_outputs(&self, run: &JobRun) -> Result<RunOutputs, ConsultationError> {
        if run.status != RunStatus::Succeeded {
            return Ok(RunOutputs::default());
        }

        let records = match run.default_dataset_id.as_deref() {
            Some(dataset_id) => match self.platform.list_dataset_items(dataset_id).await {
                Ok(records) => records,
                // A missing dataset holds no records; the mapper reports it
                // as an empty result rather than a missing actor.
                Err(PlatformError::Api { status: 404, .. }) => {
                    tracing::warn!(run_id = %run.id, dataset_id, "Run dataset not found");
                    Vec::new()
                }
                Err(e) => {
                    tracing::error!(run_id = %run.id, dataset_id, error = %e, "Dataset read failed");
                    return Err(classify_platform_error(&e, &self.links));
                }
            },
            None => Vec::new(),
        };
        tracing::debug!(run_id = %run.id, count = records.len(), "Dataset items retrieved");

        let additional_data = match run.default_key_value_store_id.as_deref() {
            Some(store_id) => match self.platform.get_record(store_id, OUTPUT_RECORD_KEY).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(run_id = %run.id, store_id, error = %e, "No additional output in key-value store");
                    None
                }
            },
            None => None,
        };

        Ok(RunOutputs {
            records,
            additional_data,
        })
    }
}
