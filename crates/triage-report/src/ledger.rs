//! Agent trace → ordered disclosure sections.

use tracing::debug;

use triage_contracts::{
    ledger::LedgerEntry,
    markup::SafeText,
    view::{LedgerRow, LedgerSection, LedgerViewModel},
};

use crate::value::format_value;

/// Agent key used when an entry names no agent.
pub const UNKNOWN_AGENT: &str = "unknown_agent";

/// Color for agents outside the known pipeline.
pub const DEFAULT_AGENT_COLOR: &str = "#4cc2ff";

/// Known pipeline agents, in pipeline order: key, display name, color.
pub const KNOWN_AGENTS: [(&str, &str, &str); 7] = [
    ("symptom_intake", "1) Symptom Intake Agent", "#70e000"),
    ("risk_scoring", "2) Risk Scoring Agent", "#ffaa00"),
    ("severity_prediction", "3) Severity Prediction Agent", "#ff6b6b"),
    ("doctor_recommendation", "4) Doctor Recommendation Agent", "#4cc2ff"),
    ("emergency_priority", "5) Emergency Priority Classifier", "#ff6b6b"),
    ("medical_report", "6) Auto-generate Medical Report Agent", "#4cc2ff"),
    ("community_coordinator", "7) Community Response Coordinator", "#70e000"),
];

/// Format every entry, in the order received. Entries are never sorted,
/// merged or dropped.
pub fn format_ledger(entries: &[LedgerEntry]) -> LedgerViewModel {
    let entries: Vec<LedgerSection> = entries.iter().map(format_entry).collect();
    debug!(entries = entries.len(), "ledger formatted");
    LedgerViewModel { entries }
}

fn format_entry(entry: &LedgerEntry) -> LedgerSection {
    let agent = entry.agent();
    let agent_key = agent.as_deref().unwrap_or(UNKNOWN_AGENT);
    let (display_name, color) = agent_identity(agent_key);

    let rows = entry
        .output
        .iter()
        .filter(|(key, _)| key.as_str() != "agent" && key.as_str() != "timestamp")
        .map(|(key, value)| LedgerRow {
            property: SafeText::escape(key),
            value: SafeText::escape(format_value(Some(value))),
        })
        .collect();

    LedgerSection {
        agent_key: SafeText::escape(agent_key),
        display_name: SafeText::escape(display_name),
        color,
        timestamp_text: SafeText::escape(format_value(entry.timestamp())),
        rows,
    }
}

/// Display name and color for `agent_key`; unknown keys show as themselves.
pub fn agent_identity(agent_key: &str) -> (&str, &'static str) {
    KNOWN_AGENTS
        .iter()
        .find(|(key, _, _)| *key == agent_key)
        .map(|(_, name, color)| (*name, *color))
        .unwrap_or((agent_key, DEFAULT_AGENT_COLOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn entry(output: Value) -> LedgerEntry {
        serde_json::from_value(json!({ "output": output })).unwrap()
    }

    #[test]
    fn known_agents_get_names_and_colors() {
        let view = format_ledger(&[
            entry(json!({"agent": "symptom_intake", "timestamp": "t1"})),
            entry(json!({"agent": "risk_scoring", "timestamp": "t2"})),
            entry(json!({"agent": "community_coordinator", "timestamp": "t3"})),
        ]);

        assert_eq!(view.entries[0].display_name.as_str(), "1) Symptom Intake Agent");
        assert_eq!(view.entries[0].color, "#70e000");
        assert_eq!(view.entries[1].color, "#ffaa00");
        assert_eq!(
            view.entries[2].display_name.as_str(),
            "7) Community Response Coordinator"
        );
        assert_eq!(view.entries[2].timestamp_text.as_str(), "t3");
    }

    #[test]
    fn unknown_and_missing_agents_fall_back() {
        let view = format_ledger(&[
            entry(json!({"agent": "triage_auditor"})),
            entry(json!({"note": "no agent key"})),
        ]);

        assert_eq!(view.entries[0].display_name.as_str(), "triage_auditor");
        assert_eq!(view.entries[0].color, DEFAULT_AGENT_COLOR);
        assert_eq!(view.entries[1].agent_key.as_str(), UNKNOWN_AGENT);
        assert_eq!(view.entries[1].display_name.as_str(), UNKNOWN_AGENT);
        assert!(view.entries[1].timestamp_text.is_empty());
    }

    #[test]
    fn scalar_agent_keys_are_shown_as_text() {
        let view = format_ledger(&[
            entry(json!({"agent": 7, "timestamp": "t", "x": 1})),
            entry(json!({"agent": true})),
        ]);

        assert_eq!(view.entries[0].agent_key.as_str(), "7");
        assert_eq!(view.entries[0].display_name.as_str(), "7");
        assert_eq!(view.entries[0].color, DEFAULT_AGENT_COLOR);
        assert_eq!(view.entries[0].rows.len(), 1);
        assert_eq!(view.entries[0].rows[0].property.as_str(), "x");
        assert_eq!(view.entries[1].display_name.as_str(), "true");
    }

    #[test]
    fn blank_or_structured_agent_keys_are_unknown() {
        let view = format_ledger(&[
            entry(json!({"agent": "", "timestamp": "t"})),
            entry(json!({"agent": "   "})),
            entry(json!({"agent": null})),
            entry(json!({"agent": ["risk_scoring"]})),
        ]);

        for section in &view.entries {
            assert_eq!(section.agent_key.as_str(), UNKNOWN_AGENT);
            assert_eq!(section.display_name.as_str(), UNKNOWN_AGENT);
            assert_eq!(section.color, DEFAULT_AGENT_COLOR);
            assert!(section.rows.is_empty());
        }
    }

    #[test]
    fn rows_keep_received_order_without_metadata() {
        let view = format_ledger(&[entry(json!({
            "agent": "risk_scoring",
            "timestamp": "2024-01-01T00:00:00Z",
            "riskScore": 7,
            "factors": ["age", "spo2"],
            "detail": {"model": "v2"}
        }))]);

        let rows = &view.entries[0].rows;
        let props: Vec<&str> = rows.iter().map(|r| r.property.as_str()).collect();
        assert_eq!(props, vec!["riskScore", "factors", "detail"]);
        assert_eq!(rows[0].value.as_str(), "7");
        assert_eq!(rows[1].value.as_str(), "age, spo2");
        assert_eq!(rows[2].value.to_plain(), "{\n  \"model\": \"v2\"\n}");
    }

    #[test]
    fn duplicate_entries_are_kept_in_order() {
        let same = entry(json!({"agent": "medical_report"}));
        let view = format_ledger(&[same.clone(), entry(json!({"agent": "symptom_intake"})), same]);
        assert_eq!(view.entries.len(), 3);
        assert_eq!(view.entries[0].agent_key, view.entries[2].agent_key);
        assert_eq!(view.entries[1].agent_key.as_str(), "symptom_intake");
    }

    #[test]
    fn hostile_ledger_values_are_escaped() {
        let view = format_ledger(&[entry(json!({
            "agent": "<b>x</b>",
            "<key>": "<script>alert(1)</script>"
        }))]);
        let section = &view.entries[0];
        assert_eq!(section.display_name.as_str(), "&lt;b&gt;x&lt;/b&gt;");
        assert_eq!(section.rows[0].property.as_str(), "&lt;key&gt;");
        assert!(!section.rows[0].value.as_str().contains("<script>"));
    }

    #[test]
    fn empty_trace_yields_no_sections() {
        assert!(format_ledger(&[]).entries.is_empty());
    }
}
