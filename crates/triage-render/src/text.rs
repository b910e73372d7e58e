//! Plain terminal renderers. View-model text is decoded back from its
//! escaped form, since a terminal does not interpret markup.

use triage_contracts::{
    language::Language,
    markup::SafeText,
    view::{DecisionView, HistoryRow, LedgerViewModel, ReportSection, ReportViewModel},
};

use crate::labels::{label, UiLabel};

const RULE: &str = "────────────────────────────────────────────────────────────";

pub fn render_report_text(report: &ReportViewModel) -> String {
    let mut out = String::new();
    for section in ReportSection::ORDER {
        match section {
            ReportSection::Header => {
                let h = &report.header;
                heading(&mut out, section);
                field(&mut out, "Patient Name", &h.patient_name);
                field(&mut out, "Case ID", &h.case_id);
                field(&mut out, "Generated", &h.generated_at);
                if !h.disclaimer.is_empty() {
                    out.push_str(&format!("  {}\n", h.disclaimer.to_plain()));
                }
            }
            ReportSection::PatientInformation => {
                let p = &report.patient;
                heading(&mut out, section);
                field(&mut out, "Name", &p.name);
                field(&mut out, "Age", &p.age);
                field(&mut out, "Sex", &p.sex);
                field(&mut out, "Reported Symptoms", &p.symptoms);
                field(&mut out, "Duration", &p.duration);
            }
            ReportSection::FirstAid => {
                heading(&mut out, section);
                bullets(&mut out, &report.first_aid);
            }
            ReportSection::VitalSigns => {
                let v = &report.vitals;
                heading(&mut out, section);
                field(&mut out, "Heart Rate", &v.heart_rate);
                field(&mut out, "Systolic BP", &v.systolic_bp);
                field(&mut out, "Diastolic BP", &v.diastolic_bp);
                field(&mut out, "SpO₂", &v.spo2);
                field(&mut out, "Temperature", &v.temperature);
            }
            ReportSection::TriageAssessment => {
                let a = &report.assessment;
                heading(&mut out, section);
                field(&mut out, "Risk Score", &a.risk_score);
                field(&mut out, "Risk Tier", &a.risk_tier);
                field(&mut out, "Severity Band", &a.severity_band);
                field(&mut out, "Priority Level", &a.emergency_priority);
            }
            ReportSection::ClinicalRecommendations => {
                heading(&mut out, section);
                out.push_str("  Suggested Specialties:\n");
                bullets(&mut out, &report.clinical.suggested_specialties);
                field(&mut out, "General Guidance", &report.clinical.general_guidance);
            }
            ReportSection::SeverityDrivers => {
                heading(&mut out, section);
                bullets(&mut out, &report.severity_drivers);
            }
            ReportSection::ClinicalNotes => {
                heading(&mut out, section);
                bullets(&mut out, &report.notes);
            }
            ReportSection::Footer => {
                out.push_str(RULE);
                out.push('\n');
                out.push_str(&report.footer.notice.to_plain());
                out.push('\n');
            }
        }
    }
    out
}

pub fn render_ledger_text(ledger: &LedgerViewModel) -> String {
    let mut out = String::new();
    for entry in &ledger.entries {
        out.push_str(&format!(
            "▸ {}  [{}]\n",
            entry.display_name.to_plain(),
            entry.timestamp_text.to_plain()
        ));
        for row in &entry.rows {
            let value = row.value.to_plain().replace('\n', "\n      ");
            out.push_str(&format!("    {}: {}\n", row.property.to_plain(), value));
        }
    }
    out
}

pub fn render_decision_text(decision: &DecisionView, language: Language) -> String {
    let mut out = format!("{}\n", label(language, UiLabel::Result));
    field(&mut out, "Case ID", &decision.case_id);
    field(&mut out, label(language, UiLabel::Severity), &decision.severity_band);
    field(&mut out, label(language, UiLabel::Priority), &decision.priority);
    field(&mut out, label(language, UiLabel::Specialties), &decision.specialties);
    if !decision.community_plan.is_empty() {
        out.push_str(&format!("  {}:\n", label(language, UiLabel::CommunityPlan)));
        bullets(&mut out, &decision.community_plan);
    }
    out
}

pub fn render_history_text(rows: &[HistoryRow], language: Language) -> String {
    let mut out = format!("{}\n", label(language, UiLabel::History));
    if rows.is_empty() {
        out.push_str("No previous cases.\n");
        return out;
    }
    out.push_str(&format!(
        "{:<24} {:<20} {:<16} {:<10} {}\n",
        "Date", "Patient", "Case ID", "Severity", "Priority"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<24} {:<20} {:<16} {:<10} {}\n",
            row.date.to_plain(),
            row.patient.to_plain(),
            row.case_id.to_plain(),
            row.severity.to_plain(),
            row.priority.to_plain()
        ));
    }
    out
}

fn heading(out: &mut String, section: ReportSection) {
    out.push_str(RULE);
    out.push('\n');
    out.push_str(section.title());
    out.push('\n');
}

fn field(out: &mut String, name: &str, value: &SafeText) {
    out.push_str(&format!("  {name}: {}\n", value.to_plain()));
}

fn bullets(out: &mut String, items: &[SafeText]) {
    for item in items {
        out.push_str(&format!("  • {}\n", item.to_plain()));
    }
}
