//! Render-ready view-models.
//!
//! View-models are complete: no optional leaves, every text leaf a
//! [`SafeText`]. Renderers only walk them; they never look at raw pipeline
//! data and never escape anything themselves.

use serde::Serialize;

use crate::markup::SafeText;

// ── Report ───────────────────────────────────────────────────────────────────

/// The clinical report, one field per section in [`ReportSection::ORDER`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportViewModel {
    pub header: ReportHeader,
    pub patient: PatientInfo,
    pub first_aid: Vec<SafeText>,
    pub vitals: VitalSigns,
    pub assessment: Assessment,
    pub clinical: ClinicalRecommendations,
    pub severity_drivers: Vec<SafeText>,
    pub notes: Vec<SafeText>,
    pub footer: ReportFooter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportHeader {
    pub patient_name: SafeText,
    pub case_id: SafeText,
    pub generated_at: SafeText,
    /// Empty when the pipeline sent none.
    pub disclaimer: SafeText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientInfo {
    pub name: SafeText,
    pub age: SafeText,
    pub sex: SafeText,
    pub symptoms: SafeText,
    pub duration: SafeText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VitalSigns {
    pub heart_rate: SafeText,
    pub systolic_bp: SafeText,
    pub diastolic_bp: SafeText,
    pub spo2: SafeText,
    pub temperature: SafeText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assessment {
    pub risk_score: SafeText,
    pub risk_tier: SafeText,
    pub severity_band: SafeText,
    pub emergency_priority: SafeText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClinicalRecommendations {
    pub suggested_specialties: Vec<SafeText>,
    pub general_guidance: SafeText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportFooter {
    pub notice: SafeText,
}

/// Report sections in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSection {
    Header,
    PatientInformation,
    FirstAid,
    VitalSigns,
    TriageAssessment,
    ClinicalRecommendations,
    SeverityDrivers,
    ClinicalNotes,
    Footer,
}

impl ReportSection {
    pub const ORDER: [ReportSection; 9] = [
        ReportSection::Header,
        ReportSection::PatientInformation,
        ReportSection::FirstAid,
        ReportSection::VitalSigns,
        ReportSection::TriageAssessment,
        ReportSection::ClinicalRecommendations,
        ReportSection::SeverityDrivers,
        ReportSection::ClinicalNotes,
        ReportSection::Footer,
    ];

    /// Section heading. The footer has none.
    pub fn title(self) -> &'static str {
        match self {
            ReportSection::Header => "EMERGENCY HEALTHCARE TRIAGE REPORT",
            ReportSection::PatientInformation => "PATIENT INFORMATION",
            ReportSection::FirstAid => "FIRST AID RECOMMENDATIONS",
            ReportSection::VitalSigns => "VITAL SIGNS",
            ReportSection::TriageAssessment => "TRIAGE ASSESSMENT",
            ReportSection::ClinicalRecommendations => "CLINICAL RECOMMENDATIONS",
            ReportSection::SeverityDrivers => "SEVERITY DRIVERS",
            ReportSection::ClinicalNotes => "CLINICAL NOTES",
            ReportSection::Footer => "",
        }
    }
}

// ── Ledger ───────────────────────────────────────────────────────────────────

/// One disclosure section per agent invocation, in trace order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerViewModel {
    pub entries: Vec<LedgerSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSection {
    pub agent_key: SafeText,
    pub display_name: SafeText,
    /// CSS hex color from a fixed palette.
    pub color: &'static str,
    pub timestamp_text: SafeText,
    pub rows: Vec<LedgerRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    pub property: SafeText,
    pub value: SafeText,
}

// ── Decision panel ───────────────────────────────────────────────────────────

/// Headline decision shown above the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecisionView {
    pub case_id: SafeText,
    pub severity_band: SafeText,
    pub priority: SafeText,
    pub specialties: SafeText,
    pub community_plan: Vec<SafeText>,
}

// ── History browser ──────────────────────────────────────────────────────────

/// One row of the case-history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    /// Raw id for replay lookups; never rendered directly.
    #[serde(skip)]
    pub key: String,
    pub date: SafeText,
    pub patient: SafeText,
    pub case_id: SafeText,
    pub severity: SafeText,
    pub priority: SafeText,
}
