//! Raw triage result types, as produced by the remote pipeline.
//!
//! Nothing here is trusted to be complete. Every field is optional and every
//! field is decoded through [`crate::lenient`], so a document with missing,
//! null, or wrong-shaped fields still parses; the bad fields are simply absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{lenient, ledger::LedgerEntry, scalar::Scalar};

/// The pipeline's medical report for one case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriageResult {
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,

    /// Report generation time, normally RFC 3339.
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    #[serde(deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub summary: Option<PatientSummary>,

    #[serde(deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub triage: Option<TriageAssessment>,

    #[serde(deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,

    #[serde(deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub rationale: Option<Rationale>,

    #[serde(deserialize_with = "lenient::list_or_default", skip_serializing_if = "Vec::is_empty")]
    pub ledger: Vec<LedgerEntry>,
}

impl TriageResult {
    /// Decode an arbitrary JSON value. Never fails: a non-object yields the
    /// empty result.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientSummary {
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,

    #[serde(deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub age: Option<Scalar>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<Scalar>,

    #[serde(deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vitals {
    #[serde(deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<Scalar>,

    #[serde(
        rename = "systolicBP",
        deserialize_with = "lenient::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub systolic_bp: Option<Scalar>,

    #[serde(
        rename = "diastolicBP",
        deserialize_with = "lenient::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub diastolic_bp: Option<Scalar>,

    #[serde(deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub spo2: Option<Scalar>,

    #[serde(
        rename = "temperatureC",
        deserialize_with = "lenient::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_c: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriageAssessment {
    #[serde(deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<Scalar>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub risk_tier: Option<String>,

    /// Coarse urgency label, e.g. "critical"; case is not normalized here.
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub severity_band: Option<String>,

    /// Dispatch priority code, e.g. "P1".
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub emergency_priority: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recommendations {
    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub first_aid: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub suggested_specialties: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub general_guidance: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rationale {
    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub severity_drivers: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}
