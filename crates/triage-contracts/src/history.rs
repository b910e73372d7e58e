//! Condensed case records kept in the local history.

use serde::{Deserialize, Serialize};

use crate::{
    lenient,
    pipeline::FinalDecision,
    triage::{PatientSummary, Recommendations, TriageAssessment, TriageResult},
};

/// Disclaimer attached to every report rebuilt from history.
pub const REPLAY_DISCLAIMER: &str = "Informational triage demo; not medical diagnosis or treatment.";

/// A completed case, condensed for the history list.
///
/// `rationale` and `disclaimer` are not kept, so a replayed report cannot
/// show them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryRecord {
    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub case_id: String,

    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub patient_name: String,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub summary: Option<PatientSummary>,

    #[serde(deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub triage: Option<TriageAssessment>,

    #[serde(deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,
}

impl HistoryRecord {
    /// Condense a live result under the patient name that was displayed for it.
    pub fn from_result(result: &TriageResult, patient_name: impl Into<String>) -> Self {
        Self {
            case_id: result.case_id.clone().unwrap_or_default(),
            patient_name: patient_name.into(),
            date: result.generated_at.clone(),
            summary: result.summary.clone(),
            triage: result.triage.clone(),
            recommendations: result.recommendations.clone(),
        }
    }

    /// Rebuild a report from the condensed record. `rationale` stays absent.
    pub fn to_result(&self) -> TriageResult {
        TriageResult {
            case_id: Some(self.case_id.clone()).filter(|id| !id.trim().is_empty()),
            generated_at: self.date.clone(),
            disclaimer: Some(REPLAY_DISCLAIMER.to_string()),
            summary: self.summary.clone(),
            triage: self.triage.clone(),
            recommendations: self.recommendations.clone(),
            rationale: None,
            ledger: Vec::new(),
        }
    }

    /// Rebuild the decision panel. The community plan is not kept.
    pub fn to_decision(&self) -> FinalDecision {
        FinalDecision {
            report: self.to_result(),
            severity_band: self.triage.as_ref().and_then(|t| t.severity_band.clone()),
            priority: self.triage.as_ref().and_then(|t| t.emergency_priority.clone()),
            specialties: self
                .recommendations
                .as_ref()
                .and_then(|r| r.suggested_specialties.clone()),
            community_plan: Vec::new(),
        }
    }
}
