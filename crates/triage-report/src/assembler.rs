//! Raw triage result → complete report view-model.
//!
//! This is the only place raw report data is turned into display text. Every
//! absent, blank or wrong-shaped field gets a fixed placeholder, and every
//! string is escaped on its way into the view-model.

use chrono::{DateTime, Utc};
use tracing::debug;

use triage_contracts::{
    markup::SafeText,
    scalar::Scalar,
    triage::{PatientSummary, Recommendations, TriageAssessment, TriageResult, Vitals},
    view::{
        Assessment, ClinicalRecommendations, PatientInfo, ReportFooter, ReportHeader,
        ReportViewModel, VitalSigns,
    },
};

/// Fixed notice closing every report.
pub const FOOTER_NOTICE: &str = "This report is generated for informational and demonstration \
purposes only. It does not constitute medical diagnosis, treatment, or advice. For emergency \
situations, contact emergency services immediately.";

const DASH: &str = "-";
const NOT_AVAILABLE: &str = "N/A";

/// Build the report view-model for `raw`.
///
/// `fallback_patient_name` is shown when the report itself carries no
/// patient name (normally the name typed into the intake form). Never fails.
pub fn assemble(raw: &TriageResult, fallback_patient_name: Option<&str>) -> ReportViewModel {
    let summary = raw.summary.clone().unwrap_or_default();
    let triage = raw.triage.clone().unwrap_or_default();
    let recommendations = raw.recommendations.clone().unwrap_or_default();
    let rationale = raw.rationale.clone().unwrap_or_default();

    let patient_name = resolve_patient_name(summary.patient_name.as_deref(), fallback_patient_name);

    debug!(
        case_id = raw.case_id.as_deref().unwrap_or(DASH),
        has_summary = raw.summary.is_some(),
        has_triage = raw.triage.is_some(),
        has_rationale = raw.rationale.is_some(),
        "assembling report"
    );

    ReportViewModel {
        header: ReportHeader {
            patient_name: SafeText::escape(&patient_name),
            case_id: text_or(raw.case_id.as_deref(), DASH),
            generated_at: SafeText::escape(format_generated_at(raw.generated_at.as_deref())),
            disclaimer: text_or(raw.disclaimer.as_deref(), ""),
        },
        patient: patient_info(&summary, &patient_name),
        first_aid: items(recommendations.first_aid.as_deref()),
        vitals: vital_signs(summary.vitals.as_ref()),
        assessment: assessment(&triage),
        clinical: clinical(&recommendations),
        severity_drivers: items_or(
            rationale.severity_drivers.as_deref(),
            "No critical factors identified",
        ),
        notes: items_or(rationale.notes.as_deref(), "No additional notes"),
        footer: ReportFooter {
            notice: SafeText::escape(FOOTER_NOTICE),
        },
    }
}

/// The name shown for a case: the report's own, then the fallback, then `-`.
pub fn resolve_patient_name(raw: Option<&str>, fallback: Option<&str>) -> String {
    present(raw)
        .or_else(|| present(fallback))
        .unwrap_or(DASH)
        .to_string()
}

/// RFC 3339 timestamps become `YYYY-MM-DD HH:MM:SS UTC`; anything else is
/// shown as received.
pub fn format_generated_at(raw: Option<&str>) -> String {
    let Some(raw) = present(raw) else {
        return DASH.to_string();
    };
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        Err(_) => raw.to_string(),
    }
}

// ── Sections ─────────────────────────────────────────────────────────────────

fn patient_info(summary: &PatientSummary, patient_name: &str) -> PatientInfo {
    let symptoms = summary
        .symptoms
        .as_deref()
        .filter(|list| !list.is_empty())
        .map(|list| list.join(", "));

    PatientInfo {
        name: SafeText::escape(patient_name),
        age: scalar_or(summary.age.as_ref(), "Not provided"),
        sex: text_or(summary.sex.as_deref(), "Not specified"),
        symptoms: text_or(symptoms.as_deref(), "None reported"),
        duration: with_unit(summary.duration_hours.as_ref(), " hours", "Not specified"),
    }
}

fn vital_signs(vitals: Option<&Vitals>) -> VitalSigns {
    let vitals = vitals.cloned().unwrap_or_default();
    VitalSigns {
        heart_rate: with_unit(vitals.heart_rate.as_ref(), " bpm", NOT_AVAILABLE),
        systolic_bp: with_unit(vitals.systolic_bp.as_ref(), " mmHg", NOT_AVAILABLE),
        diastolic_bp: with_unit(vitals.diastolic_bp.as_ref(), " mmHg", NOT_AVAILABLE),
        spo2: with_unit(vitals.spo2.as_ref(), "%", NOT_AVAILABLE),
        temperature: with_unit(vitals.temperature_c.as_ref(), "°C", NOT_AVAILABLE),
    }
}

fn assessment(triage: &TriageAssessment) -> Assessment {
    let band = present(triage.severity_band.as_deref()).map(str::to_uppercase);
    Assessment {
        risk_score: scalar_or(triage.risk_score.as_ref(), NOT_AVAILABLE),
        risk_tier: text_or(triage.risk_tier.as_deref(), "Unknown"),
        severity_band: text_or(band.as_deref(), "UNKNOWN"),
        emergency_priority: text_or(triage.emergency_priority.as_deref(), "UNCLASSIFIED"),
    }
}

fn clinical(recommendations: &Recommendations) -> ClinicalRecommendations {
    ClinicalRecommendations {
        suggested_specialties: items(recommendations.suggested_specialties.as_deref()),
        general_guidance: text_or(
            recommendations.general_guidance.as_deref(),
            "No guidance available",
        ),
    }
}

// ── Leaf helpers ─────────────────────────────────────────────────────────────

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn text_or(value: Option<&str>, placeholder: &str) -> SafeText {
    SafeText::escape(present(value).unwrap_or(placeholder))
}

fn scalar_text(value: Option<&Scalar>) -> Option<String> {
    value.map(Scalar::to_string).filter(|s| !s.trim().is_empty())
}

fn scalar_or(value: Option<&Scalar>, placeholder: &str) -> SafeText {
    SafeText::escape(scalar_text(value).unwrap_or_else(|| placeholder.to_string()))
}

fn with_unit(value: Option<&Scalar>, unit: &str, placeholder: &str) -> SafeText {
    match scalar_text(value) {
        Some(text) => SafeText::escape(format!("{text}{unit}")),
        None => SafeText::escape(placeholder),
    }
}

fn items(list: Option<&[String]>) -> Vec<SafeText> {
    list.unwrap_or_default()
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(SafeText::escape)
        .collect()
}

fn items_or(list: Option<&[String]>, placeholder: &str) -> Vec<SafeText> {
    let escaped = items(list);
    if escaped.is_empty() {
        vec![SafeText::escape(placeholder)]
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triage_contracts::view::ReportSection;

    #[test]
    fn minimal_case_renders_given_fields_and_placeholders() {
        let raw = TriageResult::from_value(json!({
            "summary": {"age": 34, "symptoms": ["fever", "cough"]},
            "triage": {"severityBand": "high"}
        }));
        let view = assemble(&raw, None);

        assert_eq!(view.patient.age.as_str(), "34");
        assert_eq!(view.patient.symptoms.as_str(), "fever, cough");
        assert_eq!(view.assessment.severity_band.as_str(), "HIGH");
        assert_eq!(view.assessment.risk_score.as_str(), "N/A");
        assert_eq!(view.clinical.general_guidance.as_str(), "No guidance available");
    }

    fn full_result() -> TriageResult {
        TriageResult::from_value(json!({
            "caseId": "CASE-001",
            "generatedAt": "2024-05-01T08:30:00+05:30",
            "disclaimer": "Demo only.",
            "summary": {
                "patientName": "Asha Rao",
                "age": 54,
                "sex": "female",
                "symptoms": ["chest pain", "shortness of breath"],
                "durationHours": 2,
                "vitals": {
                    "heartRate": 118,
                    "systolicBP": 150,
                    "diastolicBP": 95,
                    "spo2": 91,
                    "temperatureC": 37.2
                }
            },
            "triage": {
                "riskScore": 8.5,
                "riskTier": "high",
                "severityBand": "critical",
                "emergencyPriority": "P1"
            },
            "recommendations": {
                "firstAid": ["Keep patient seated", "Loosen tight clothing"],
                "suggestedSpecialties": ["Cardiology", "Emergency Medicine"],
                "generalGuidance": "Seek emergency care now."
            },
            "rationale": {
                "severityDrivers": ["Low SpO2"],
                "notes": ["Possible ACS"]
            }
        }))
    }

    #[test]
    fn full_result_populates_every_section() {
        let view = assemble(&full_result(), Some("ignored"));

        assert_eq!(view.header.patient_name.as_str(), "Asha Rao");
        assert_eq!(view.header.case_id.as_str(), "CASE-001");
        assert_eq!(view.header.generated_at.as_str(), "2024-05-01 03:00:00 UTC");
        assert_eq!(view.header.disclaimer.as_str(), "Demo only.");

        assert_eq!(view.patient.age.as_str(), "54");
        assert_eq!(view.patient.symptoms.as_str(), "chest pain, shortness of breath");
        assert_eq!(view.patient.duration.as_str(), "2 hours");

        assert_eq!(view.vitals.heart_rate.as_str(), "118 bpm");
        assert_eq!(view.vitals.systolic_bp.as_str(), "150 mmHg");
        assert_eq!(view.vitals.diastolic_bp.as_str(), "95 mmHg");
        assert_eq!(view.vitals.spo2.as_str(), "91%");
        assert_eq!(view.vitals.temperature.as_str(), "37.2°C");

        assert_eq!(view.assessment.risk_score.as_str(), "8.5");
        assert_eq!(view.assessment.severity_band.as_str(), "CRITICAL");
        assert_eq!(view.assessment.emergency_priority.as_str(), "P1");

        assert_eq!(view.first_aid.len(), 2);
        assert_eq!(view.clinical.suggested_specialties[0].as_str(), "Cardiology");
        assert_eq!(view.severity_drivers, vec![SafeText::escape("Low SpO2")]);
        assert_eq!(view.notes, vec![SafeText::escape("Possible ACS")]);
        assert_eq!(view.footer.notice.as_str(), FOOTER_NOTICE);
    }

    #[test]
    fn empty_result_uses_every_placeholder() {
        let view = assemble(&TriageResult::default(), None);

        assert_eq!(view.header.patient_name.as_str(), "-");
        assert_eq!(view.header.case_id.as_str(), "-");
        assert_eq!(view.header.generated_at.as_str(), "-");
        assert!(view.header.disclaimer.is_empty());

        assert_eq!(view.patient.age.as_str(), "Not provided");
        assert_eq!(view.patient.sex.as_str(), "Not specified");
        assert_eq!(view.patient.symptoms.as_str(), "None reported");
        assert_eq!(view.patient.duration.as_str(), "Not specified");

        assert_eq!(view.vitals.heart_rate.as_str(), "N/A");
        assert_eq!(view.vitals.temperature.as_str(), "N/A");

        assert_eq!(view.assessment.risk_score.as_str(), "N/A");
        assert_eq!(view.assessment.risk_tier.as_str(), "Unknown");
        assert_eq!(view.assessment.severity_band.as_str(), "UNKNOWN");
        assert_eq!(view.assessment.emergency_priority.as_str(), "UNCLASSIFIED");

        assert!(view.first_aid.is_empty());
        assert!(view.clinical.suggested_specialties.is_empty());
        assert_eq!(view.clinical.general_guidance.as_str(), "No guidance available");
        assert_eq!(view.severity_drivers[0].as_str(), "No critical factors identified");
        assert_eq!(view.notes[0].as_str(), "No additional notes");
    }

    #[test]
    fn empty_lists_fall_back_like_absent_ones() {
        let raw = TriageResult::from_value(json!({
            "summary": {"symptoms": []},
            "rationale": {"severityDrivers": [], "notes": ["  "]}
        }));
        let view = assemble(&raw, None);
        assert_eq!(view.patient.symptoms.as_str(), "None reported");
        assert_eq!(view.severity_drivers[0].as_str(), "No critical factors identified");
        assert_eq!(view.notes[0].as_str(), "No additional notes");
    }

    #[test]
    fn zero_readings_are_shown_not_replaced() {
        let raw = TriageResult::from_value(json!({
            "summary": {"age": 0, "durationHours": 0, "vitals": {"heartRate": 0}},
            "triage": {"riskScore": 0}
        }));
        let view = assemble(&raw, None);
        assert_eq!(view.patient.age.as_str(), "0");
        assert_eq!(view.patient.duration.as_str(), "0 hours");
        assert_eq!(view.vitals.heart_rate.as_str(), "0 bpm");
        assert_eq!(view.assessment.risk_score.as_str(), "0");
    }

    #[test]
    fn fallback_name_fills_missing_patient_name() {
        let raw = TriageResult::from_value(json!({"summary": {"patientName": ""}}));
        let view = assemble(&raw, Some("Ravi"));
        assert_eq!(view.header.patient_name.as_str(), "Ravi");
        assert_eq!(view.patient.name.as_str(), "Ravi");
    }

    #[test]
    fn hostile_text_is_escaped() {
        let raw = TriageResult::from_value(json!({
            "caseId": "<b>id</b>",
            "summary": {"patientName": "<script>alert('x')</script>"},
            "recommendations": {"firstAid": ["<img src=x onerror=alert(1)>"]}
        }));
        let view = assemble(&raw, None);
        assert_eq!(
            view.header.patient_name.as_str(),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(view.header.case_id.as_str(), "&lt;b&gt;id&lt;/b&gt;");
        assert!(!view.first_aid[0].as_str().contains('<'));
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(format_generated_at(Some("yesterday")), "yesterday");
        assert_eq!(format_generated_at(Some("2024-01-02T03:04:05Z")), "2024-01-02 03:04:05 UTC");
        assert_eq!(format_generated_at(Some("   ")), "-");
    }

    #[test]
    fn string_scalars_are_kept_as_given() {
        let raw = TriageResult::from_value(json!({
            "summary": {"age": "54 years", "vitals": {"spo2": "low"}}
        }));
        let view = assemble(&raw, None);
        assert_eq!(view.patient.age.as_str(), "54 years");
        assert_eq!(view.vitals.spo2.as_str(), "low%");
    }

    #[test]
    fn assembling_is_deterministic() {
        let raw = full_result();
        assert_eq!(assemble(&raw, None), assemble(&raw, None));
    }

    #[test]
    fn section_order_is_fixed() {
        let titles: Vec<&str> = ReportSection::ORDER.iter().map(|s| s.title()).collect();
        assert_eq!(titles[0], "EMERGENCY HEALTHCARE TRIAGE REPORT");
        assert_eq!(titles[1], "PATIENT INFORMATION");
        assert_eq!(titles[7], "CLINICAL NOTES");
        assert_eq!(ReportSection::ORDER.last(), Some(&ReportSection::Footer));
    }
}
