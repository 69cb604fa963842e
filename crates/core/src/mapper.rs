//! Turns a finished run and its outputs into the caller-facing report.

use serde::Serialize;
use serde_json::Value;

use crate::consultation::ConsultationResult;
use crate::error::{ConsultationError, RunFailure};
use crate::links::ConsoleLinks;
use crate::run::{JobRun, RunStatus};
use crate::types::Timestamp;

/// Outputs collected from a succeeded run's storages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutputs {
    /// Dataset records in insertion order.
    pub records: Vec<Value>,
    /// The `OUTPUT` record of the key-value store, if any.
    pub additional_data: Option<Value>,
}

/// Successful consultation response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationReport {
    pub success: bool,
    pub message: &'static str,
    pub data: ConsultationResult,
    pub run_id: String,
    pub status: RunStatus,
    pub started_at: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
    pub duration_ms: Option<i64>,
    pub additional_data: Option<Value>,
    pub console_url: String,
    pub dataset_url: Option<String>,
    pub key_value_store_url: Option<String>,
    pub timestamp: Timestamp,
}

/// Map a run to a report.
///
/// Pure: the same inputs always give the same output. Only the first
/// dataset record is used.
pub fn map_run(
    run: &JobRun,
    outputs: &RunOutputs,
    links: &ConsoleLinks,
    generated_at: Timestamp,
) -> Result<ConsultationReport, ConsultationError> {
    if run.status != RunStatus::Succeeded {
        return Err(ConsultationError::JobTerminal(Box::new(run_failure(run, links))));
    }

    let Some(first) = outputs.records.first() else {
        return Err(ConsultationError::NoResult(Box::new(run_failure(run, links))));
    };

    Ok(ConsultationReport {
        success: true,
        message: "GTM consultation completed successfully",
        data: ConsultationResult::from_record(first),
        run_id: run.id.clone(),
        status: run.status,
        started_at: run.started_at,
        finished_at: run.finished_at,
        duration_ms: run.duration_ms(),
        additional_data: outputs.additional_data.clone(),
        console_url: links.run(&run.id),
        dataset_url: run.default_dataset_id.as_deref().map(|id| links.dataset(id)),
        key_value_store_url: run
            .default_key_value_store_id
            .as_deref()
            .map(|id| links.key_value_store(id)),
        timestamp: generated_at,
    })
}

fn run_failure(run: &JobRun, links: &ConsoleLinks) -> RunFailure {
    RunFailure {
        run_id: run.id.clone(),
        status: run.status,
        status_message: run.status_message.clone(),
        console_url: links.run(&run.id),
        dataset_url: run.default_dataset_id.as_deref().map(|id| links.dataset(id)),
    }
}
