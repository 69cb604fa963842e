//! The consultation pipeline: validate, invoke, map.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::classify::classify_platform_error;
use crate::consultation::ConsultationRequest;
use crate::error::ConsultationError;
use crate::invoker::{ActorSettings, JobInvoker};
use crate::links::ConsoleLinks;
use crate::mapper::{map_run, ConsultationReport};
use crate::platform::ActorPlatform;
use crate::run::{ActorInfo, RunStatus};
use crate::types::Timestamp;

/// How many runs the recent-runs listing returns.
pub const RECENT_RUNS_LIMIT: u32 = 10;

/// Condensed view of a past run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub id: String,
    pub status: RunStatus,
    pub started_at: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
    pub status_message: Option<String>,
    pub console_url: String,
}

/// Long-lived service shared by all in-flight requests.
pub struct ConsultationService {
    platform: Arc<dyn ActorPlatform>,
    invoker: JobInvoker,
    links: ConsoleLinks,
    confirm_default: bool,
}

impl ConsultationService {
    pub fn new(
        platform: Arc<dyn ActorPlatform>,
        settings: ActorSettings,
        links: ConsoleLinks,
        confirm_default: bool,
    ) -> Self {
        let invoker = JobInvoker::new(Arc::clone(&platform), settings, links.clone());
        Self {
            platform,
            invoker,
            links,
            confirm_default,
        }
    }

    pub fn actor_id(&self) -> &str {
        &self.invoker.settings().actor_id
    }

    /// Run one consultation end to end.
    ///
    /// The returned report is stamped with the time mapping happened.
    pub async fn consult(&self, payload: &Value) -> Result<ConsultationReport, ConsultationError> {
        let request = ConsultationRequest::from_payload(payload, self.confirm_default)?;
        tracing::info!(
            client_name = %request.client_name,
            company_name = %request.company_name,
            "Consultation request validated",
        );

        let run = self.invoker.invoke(&request).await?;
        let outputs = self.invoker.collect_outputs(&run).await?;

        map_run(&run, &outputs, &self.links, chrono::Utc::now())
    }

    /// Metadata of the configured actor.
    pub async fn actor_info(&self) -> Result<ActorInfo, ConsultationError> {
        self.platform
            .get_actor(self.actor_id())
            .await
            .map_err(|e| classify_platform_error(&e, &self.links))
    }

    /// The latest runs of the configured actor, newest first.
    pub async fn recent_runs(&self) -> Result<Vec<RunSummary>, ConsultationError> {
        let runs = self
            .platform
            .list_runs(self.actor_id(), RECENT_RUNS_LIMIT)
            .await
            .map_err(|e| classify_platform_error(&e, &self.links))?;

        Ok(runs
            .into_iter()
            .map(|run| RunSummary {
                console_url: self.links.run(&run.id),
                id: run.id,
                status: run.status,
                started_at: run.started_at,
                finished_at: run.finished_at,
                status_message: run.status_message,
            })
            .collect())
    }
}
