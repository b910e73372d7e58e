//! Request and response payloads of the remote triage pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{lenient, ledger::LedgerEntry, triage::TriageResult};

// ── Request ──────────────────────────────────────────────────────────────────

/// Validated intake, ready to POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    pub patient_name: String,
    pub age: f64,
    pub sex: String,
    pub symptoms_text: String,
    pub duration_hours: f64,
    pub vitals: IntakeVitals,
    pub location_hint: String,
}

/// Optional vital signs. Unset readings are omitted from the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeVitals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "systolicBP", skip_serializing_if = "Option::is_none")]
    pub systolic_bp: Option<f64>,
    #[serde(rename = "diastolicBP", skip_serializing_if = "Option::is_none")]
    pub diastolic_bp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spo2: Option<f64>,
    #[serde(rename = "temperatureC", skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

// ── Response ─────────────────────────────────────────────────────────────────

/// The pipeline's answer: the final decision plus the agent trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineResponse {
    #[serde(rename = "final", deserialize_with = "lenient::or_default")]
    pub decision: FinalDecision,

    #[serde(deserialize_with = "lenient::list_or_default")]
    pub ledger: Vec<LedgerEntry>,
}

impl PipelineResponse {
    /// Decode any JSON document. Never fails; unusable parts are empty.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinalDecision {
    #[serde(deserialize_with = "lenient::or_default")]
    pub report: TriageResult,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub severity_band: Option<String>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient::list_or_default", skip_serializing_if = "Vec::is_empty")]
    pub community_plan: Vec<CommunityAction>,
}

/// One locality-scoped, non-clinical response action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityAction {
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
