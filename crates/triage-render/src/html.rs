//! HTML renderers.
//!
//! Every dynamic value comes from a view-model as `SafeText` and is written
//! verbatim. Fixed labels go through `escape_markup`. Nothing here ever
//! touches raw pipeline data.

use triage_contracts::{
    language::Language,
    markup::{escape_markup, SafeText},
    view::{
        DecisionView, HistoryRow, LedgerSection, LedgerViewModel, ReportSection, ReportViewModel,
    },
};

use crate::labels::{label, UiLabel};

// ── Report ───────────────────────────────────────────────────────────────────

pub fn render_report_html(report: &ReportViewModel) -> String {
    let mut html = String::from("<div class=\"official-report\">\n");
    for section in ReportSection::ORDER {
        match section {
            ReportSection::Header => {
                let h = &report.header;
                open_section(&mut html, "report-header", section);
                html.push_str("<div class=\"report-meta\">\n");
                meta_line(&mut html, "Patient Name:", &h.patient_name);
                meta_line(&mut html, "Case ID:", &h.case_id);
                meta_line(&mut html, "Generated:", &h.generated_at);
                if !h.disclaimer.is_empty() {
                    html.push_str(&format!("<p class=\"disclaimer\"><em>{}</em></p>\n", h.disclaimer));
                }
                html.push_str("</div>\n</div>\n");
            }
            ReportSection::PatientInformation => {
                let p = &report.patient;
                open_section(&mut html, "report-section", section);
                table(
                    &mut html,
                    &[
                        ("Name:", &p.name),
                        ("Age:", &p.age),
                        ("Sex:", &p.sex),
                        ("Reported Symptoms:", &p.symptoms),
                        ("Duration:", &p.duration),
                    ],
                );
                html.push_str("</div>\n");
            }
            ReportSection::FirstAid => list_section(&mut html, section, &report.first_aid),
            ReportSection::VitalSigns => {
                let v = &report.vitals;
                open_section(&mut html, "report-section", section);
                table(
                    &mut html,
                    &[
                        ("Heart Rate:", &v.heart_rate),
                        ("Systolic BP:", &v.systolic_bp),
                        ("Diastolic BP:", &v.diastolic_bp),
                        ("SpO₂:", &v.spo2),
                        ("Temperature:", &v.temperature),
                    ],
                );
                html.push_str("</div>\n");
            }
            ReportSection::TriageAssessment => {
                let a = &report.assessment;
                open_section(&mut html, "report-section", section);
                table(
                    &mut html,
                    &[
                        ("Risk Score:", &a.risk_score),
                        ("Risk Tier:", &a.risk_tier),
                        ("Severity Band:", &a.severity_band),
                        ("Priority Level:", &a.emergency_priority),
                    ],
                );
                html.push_str("</div>\n");
            }
            ReportSection::ClinicalRecommendations => {
                let c = &report.clinical;
                open_section(&mut html, "report-section", section);
                html.push_str("<p><strong>Suggested Specialties:</strong></p>\n");
                list(&mut html, &c.suggested_specialties);
                html.push_str("<p><strong>General Guidance:</strong></p>\n");
                html.push_str(&format!("<p class=\"guidance\">{}</p>\n", c.general_guidance));
                html.push_str("</div>\n");
            }
            ReportSection::SeverityDrivers => {
                list_section(&mut html, section, &report.severity_drivers)
            }
            ReportSection::ClinicalNotes => list_section(&mut html, section, &report.notes),
            ReportSection::Footer => {
                html.push_str(&format!(
                    "<div class=\"report-footer\"><p><em>{}</em></p></div>\n",
                    report.footer.notice
                ));
            }
        }
    }
    html.push_str("</div>\n");
    html
}

fn open_section(html: &mut String, class: &str, section: ReportSection) {
    let tag = if section == ReportSection::Header { "h3" } else { "h4" };
    html.push_str(&format!(
        "<div class=\"{class}\">\n<{tag}>{}</{tag}>\n",
        escape_markup(section.title())
    ));
}

fn meta_line(html: &mut String, name: &str, value: &SafeText) {
    html.push_str(&format!(
        "<p><strong>{}</strong> {}</p>\n",
        escape_markup(name),
        value
    ));
}

fn table(html: &mut String, rows: &[(&str, &SafeText)]) {
    html.push_str("<table class=\"report-table\">\n");
    for (name, value) in rows {
        html.push_str(&format!(
            "<tr><td class=\"label\">{}</td><td>{}</td></tr>\n",
            escape_markup(name),
            value
        ));
    }
    html.push_str("</table>\n");
}

fn list(html: &mut String, items: &[SafeText]) {
    html.push_str("<ul>\n");
    for item in items {
        html.push_str(&format!("<li>{item}</li>\n"));
    }
    html.push_str("</ul>\n");
}

fn list_section(html: &mut String, section: ReportSection, items: &[SafeText]) {
    open_section(html, "report-section", section);
    list(html, items);
    html.push_str("</div>\n");
}

// ── Ledger ───────────────────────────────────────────────────────────────────

/// One collapsible `<details>` element per agent invocation.
pub fn render_ledger_html(ledger: &LedgerViewModel) -> String {
    let mut html = String::from("<div class=\"ledger-entries\">\n");
    for entry in &ledger.entries {
        ledger_entry(&mut html, entry);
    }
    html.push_str("</div>\n");
    html
}

fn ledger_entry(html: &mut String, entry: &LedgerSection) {
    html.push_str(&format!(
        "<details class=\"ledger-entry\" data-agent=\"{key}\" style=\"border-left: 4px solid {color}\">\n\
         <summary><strong style=\"color: {color}\">{name}</strong> \
         <span class=\"timestamp\">Timestamp: {ts}</span></summary>\n",
        key = entry.agent_key,
        color = entry.color,
        name = entry.display_name,
        ts = entry.timestamp_text,
    ));
    html.push_str("<table>\n<thead><tr><th>Property</th><th>Value</th></tr></thead>\n<tbody>\n");
    for row in &entry.rows {
        let value = if row.value.as_str().contains('\n') {
            format!("<pre>{}</pre>", row.value)
        } else {
            row.value.to_string()
        };
        html.push_str(&format!("<tr><td>{}</td><td>{value}</td></tr>\n", row.property));
    }
    html.push_str("</tbody>\n</table>\n</details>\n");
}

// ── Decision panel ───────────────────────────────────────────────────────────

pub fn render_decision_html(decision: &DecisionView, language: Language) -> String {
    let mut html = format!(
        "<section class=\"result\">\n<h2>{}</h2>\n",
        escape_markup(label(language, UiLabel::Result))
    );
    html.push_str(&format!("<p><strong>Case ID:</strong> {}</p>\n", decision.case_id));
    for (ui, value) in [
        (UiLabel::Severity, &decision.severity_band),
        (UiLabel::Priority, &decision.priority),
        (UiLabel::Specialties, &decision.specialties),
    ] {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>\n",
            escape_markup(label(language, ui)),
            value
        ));
    }
    html.push_str(&format!(
        "<p><strong>{}:</strong></p>\n",
        escape_markup(label(language, UiLabel::CommunityPlan))
    ));
    list(&mut html, &decision.community_plan);
    html.push_str("</section>\n");
    html
}

// ── History ──────────────────────────────────────────────────────────────────

pub fn render_history_html(rows: &[HistoryRow], language: Language) -> String {
    let mut html = format!(
        "<section class=\"history\">\n<h2>{}</h2>\n",
        escape_markup(label(language, UiLabel::History))
    );
    if rows.is_empty() {
        html.push_str("<p>No previous cases.</p>\n</section>\n");
        return html;
    }
    html.push_str(
        "<table class=\"history-table\">\n<thead><tr><th>Date</th><th>Patient</th>\
         <th>Case ID</th><th>Severity</th><th>Priority</th></tr></thead>\n<tbody>\n",
    );
    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.date, row.patient, row.case_id, row.severity, row.priority
        ));
    }
    html.push_str("</tbody>\n</table>\n</section>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triage_contracts::{history::HistoryRecord, ledger::LedgerEntry, triage::TriageResult};
    use triage_report::{assemble, format_ledger};

    fn hostile_result() -> TriageResult {
        TriageResult::from_value(json!({
            "caseId": "C-1",
            "summary": {"patientName": "<script>alert('pwned')</script>", "symptoms": ["<b>pain</b>"]},
            "recommendations": {"firstAid": ["Apply pressure & elevate"]}
        }))
    }

    #[test]
    fn hostile_patient_name_never_reaches_markup_raw() {
        let html = render_report_html(&assemble(&hostile_result(), None));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>pain</b>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;pwned&#39;)&lt;/script&gt;"));
        assert!(html.contains("Apply pressure &amp; elevate"));
    }

    #[test]
    fn report_sections_appear_in_fixed_order() {
        let html = render_report_html(&assemble(&TriageResult::default(), None));
        let positions: Vec<usize> = ReportSection::ORDER
            .iter()
            .filter(|s| **s != ReportSection::Footer)
            .map(|s| html.find(s.title()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.find("report-footer").unwrap() > positions[positions.len() - 1]);
    }

    #[test]
    fn ledger_sections_are_details_with_agent_color() {
        let entries: Vec<LedgerEntry> = vec![
            serde_json::from_value(json!({"output": {"agent": "risk_scoring", "timestamp": "t1", "score": 4}})).unwrap(),
            serde_json::from_value(json!({"output": {"agent": "mystery", "detail": {"a": 1}}})).unwrap(),
        ];
        let html = render_ledger_html(&format_ledger(&entries));

        assert_eq!(html.matches("<details").count(), 2);
        assert!(html.contains("color: #ffaa00\">2) Risk Scoring Agent</strong>"));
        assert!(html.contains("color: #4cc2ff\">mystery</strong>"));
        assert!(html.contains("<tr><td>score</td><td>4</td></tr>"));
        assert!(html.contains("<pre>{\n  &quot;a&quot;: 1\n}</pre>"));
    }

    #[test]
    fn decision_panel_uses_language_labels() {
        let view = DecisionView {
            case_id: SafeText::escape("C-1"),
            severity_band: SafeText::escape("HIGH"),
            priority: SafeText::escape("P2"),
            specialties: SafeText::escape("Neurology"),
            community_plan: vec![SafeText::escape("Alert — PHC (<1 km)")],
        };
        let html = render_decision_html(&view, Language::Hi);
        assert!(html.contains("गंभीरता:</strong> HIGH"));
        assert!(html.contains("<li>Alert — PHC (&lt;1 km)</li>"));
    }

    #[test]
    fn history_table_and_empty_state() {
        assert!(render_history_html(&[], Language::En).contains("No previous cases."));

        let record = HistoryRecord {
            case_id: "C-5".into(),
            patient_name: "<i>Ravi</i>".into(),
            ..HistoryRecord::default()
        };
        let cache_rows = vec![HistoryRow {
            key: record.case_id.clone(),
            date: SafeText::escape("-"),
            patient: SafeText::escape(&record.patient_name),
            case_id: SafeText::escape(&record.case_id),
            severity: SafeText::escape("-"),
            priority: SafeText::escape("-"),
        }];
        let html = render_history_html(&cache_rows, Language::Kn);
        assert!(html.contains("ಕೇಸ್ ಇತಿಹಾಸ"));
        assert!(html.contains("<td>&lt;i&gt;Ravi&lt;/i&gt;</td><td>C-5</td>"));
    }
}
