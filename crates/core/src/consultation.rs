//! Consultation request validation and the actor's result record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConsultationError;
use crate::types::JsonObject;

/// Fields a caller must supply with a truthy value.
pub const REQUIRED_FIELDS: [&str; 4] = [
    "client_name",
    "company_name",
    "gtm_challenge",
    "business_stage",
];

/// A validated consultation submission.
///
/// Serializes to exactly the input object the consultant actor expects:
/// every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsultationRequest {
    pub client_name: String,
    pub client_designation: String,
    pub company_name: String,
    pub company_description: String,
    pub gtm_challenge: String,
    pub business_stage: String,
    pub industry: String,
    pub current_team_size: String,
    pub budget_range: String,
    pub specific_focus: String,
    pub confirm_new_consultation: bool,
}

impl ConsultationRequest {
    /// Validate a raw JSON body and fill optional fields with defaults.
    ///
    /// Anything that is not an object is treated as an empty object. A
    /// mandatory field is missing when it is absent or falsy (`null`,
    /// `false`, `0`, `""`). On failure the error lists every missing field
    /// in [`REQUIRED_FIELDS`] order.
    pub fn from_payload(
        payload: &Value,
        confirm_default: bool,
    ) -> Result<Self, ConsultationError> {
        let empty = JsonObject::new();
        let body = payload.as_object().unwrap_or(&empty);

        let missing_fields: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !body.get(*field).is_some_and(is_truthy))
            .collect();

        if !missing_fields.is_empty() {
            return Err(ConsultationError::Validation { missing_fields });
        }

        let text = |field: &str| body.get(field).map(text_or_default).unwrap_or_default();

        let confirm_new_consultation = match body.get("confirm_new_consultation") {
            Some(value) if is_truthy(value) => true,
            _ => confirm_default,
        };

        Ok(Self {
            client_name: text("client_name"),
            client_designation: text("client_designation"),
            company_name: text("company_name"),
            company_description: text("company_description"),
            gtm_challenge: text("gtm_challenge"),
            business_stage: text("business_stage"),
            industry: text("industry"),
            current_team_size: text("current_team_size"),
            budget_range: text("budget_range"),
            specific_focus: text("specific_focus"),
            confirm_new_consultation,
        })
    }
}

/// JavaScript-style truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Falsy values collapse to the empty string; other non-strings keep their
/// JSON text.
fn text_or_default(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other if is_truthy(other) => other.to_string(),
        _ => String::new(),
    }
}

/// First record of a run's dataset, as produced by the consultant actor.
///
/// Keys keep the actor's snake_case names. Absent keys decode as `None`
/// and serialize back as `null` so the response shape never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationResult {
    #[serde(default)]
    pub consultation_id: Option<Value>,
    #[serde(default)]
    pub report_url: Option<Value>,
    #[serde(default)]
    pub primary_epic_focus: Option<Value>,
    #[serde(default)]
    pub epic_scores: Option<Value>,
    #[serde(default)]
    pub consultation_output: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl ConsultationResult {
    /// Pick the fixed field set out of a dataset record.
    pub fn from_record(record: &Value) -> Self {
        let field = |key: &str| record.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            consultation_id: field("consultation_id"),
            report_url: field("report_url"),
            primary_epic_focus: field("primary_epic_focus"),
            epic_scores: field("epic_scores"),
            consultation_output: field("consultation_output"),
            timestamp: field("timestamp"),
        }
    }
}
