//! Bounded, newest-first case history.

use tracing::debug;

use triage_contracts::{
    history::HistoryRecord,
    markup::SafeText,
    view::{DecisionView, HistoryRow, ReportViewModel},
};
use triage_report::{
    assembler::{assemble, format_generated_at},
    build_decision,
};

/// The history keeps at most this many cases.
pub const CAPACITY: usize = 10;

/// Newest-first list of condensed cases.
///
/// Duplicates are allowed; lookups return the most recent match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryCache {
    records: Vec<HistoryRecord>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from a persisted snapshot, keeping the first
    /// [`CAPACITY`] records.
    pub fn from_records(mut records: Vec<HistoryRecord>) -> Self {
        records.truncate(CAPACITY);
        Self { records }
    }

    /// Prepend `record`, evicting the oldest case beyond [`CAPACITY`].
    pub fn insert(&mut self, record: HistoryRecord) {
        debug!(case_id = %record.case_id, "history insert");
        self.records.insert(0, record);
        self.records.truncate(CAPACITY);
    }

    pub fn list(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record with `case_id`.
    pub fn get(&self, case_id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.case_id == case_id)
    }

    /// Rebuild the report of a stored case. `None` on a cache miss.
    ///
    /// The stored record has no rationale, so replayed reports always show
    /// both rationale placeholders.
    pub fn replay(&self, case_id: &str) -> Option<ReportViewModel> {
        let record = self.get(case_id)?;
        debug!(case_id, "history replay");
        Some(assemble(&record.to_result(), Some(&record.patient_name)))
    }

    /// Decision panel of a stored case. The community plan is not kept.
    pub fn replay_decision(&self, case_id: &str) -> Option<DecisionView> {
        let record = self.get(case_id)?;
        Some(build_decision(&record.to_decision()))
    }

    /// One display row per record, newest first.
    pub fn rows(&self) -> Vec<HistoryRow> {
        self.records.iter().map(history_row).collect()
    }
}

fn history_row(record: &HistoryRecord) -> HistoryRow {
    let triage = record.triage.as_ref();
    let severity = triage
        .and_then(|t| t.severity_band.as_deref())
        .map(str::to_uppercase)
        .unwrap_or_else(|| "-".to_string());
    let priority = triage
        .and_then(|t| t.emergency_priority.as_deref())
        .unwrap_or("-");

    HistoryRow {
        key: record.case_id.clone(),
        date: SafeText::escape(format_generated_at(record.date.as_deref())),
        patient: SafeText::escape(or_dash(&record.patient_name)),
        case_id: SafeText::escape(or_dash(&record.case_id)),
        severity: SafeText::escape(severity),
        priority: SafeText::escape(priority),
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triage_contracts::{history::REPLAY_DISCLAIMER, triage::TriageResult};

    fn make_record(case_id: &str) -> HistoryRecord {
        let raw = TriageResult::from_value(json!({
            "caseId": case_id,
            "generatedAt": "2024-06-01T12:00:00Z",
            "summary": {"patientName": format!("Patient {case_id}"), "age": 40},
            "triage": {"severityBand": "moderate", "emergencyPriority": "P3"},
            "recommendations": {"suggestedSpecialties": ["General Medicine"]},
            "rationale": {"severityDrivers": ["fever"], "notes": ["hydrate"]}
        }));
        HistoryRecord::from_result(&raw, format!("Patient {case_id}"))
    }

    #[test]
    fn insert_is_newest_first() {
        let mut cache = HistoryCache::new();
        cache.insert(make_record("A"));
        cache.insert(make_record("B"));
        let ids: Vec<&str> = cache.list().iter().map(|r| r.case_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn eleventh_insert_evicts_the_oldest() {
        let mut cache = HistoryCache::new();
        for i in 1..=11 {
            cache.insert(make_record(&format!("C{i}")));
        }
        assert_eq!(cache.len(), CAPACITY);
        assert_eq!(cache.list()[0].case_id, "C11");
        assert_eq!(cache.list()[9].case_id, "C2");
        assert!(cache.get("C1").is_none());
    }

    #[test]
    fn duplicates_are_kept_and_lookup_finds_most_recent() {
        let mut cache = HistoryCache::new();
        let mut older = make_record("DUP");
        older.patient_name = "Older".into();
        cache.insert(older);
        cache.insert(make_record("DUP"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("DUP").unwrap().patient_name, "Patient DUP");
    }

    #[test]
    fn replay_miss_is_none() {
        let cache = HistoryCache::new();
        assert!(cache.replay("missing").is_none());
    }

    #[test]
    fn replay_decision_uses_stored_triage() {
        let mut cache = HistoryCache::new();
        cache.insert(make_record("A"));

        let decision = cache.replay_decision("A").unwrap();
        assert_eq!(decision.case_id.as_str(), "A");
        assert_eq!(decision.severity_band.as_str(), "MODERATE");
        assert_eq!(decision.priority.as_str(), "P3");
        assert_eq!(decision.specialties.as_str(), "General Medicine");
        assert!(decision.community_plan.is_empty());
        assert!(cache.replay_decision("B").is_none());
    }

    #[test]
    fn replay_rebuilds_report_without_rationale() {
        let mut cache = HistoryCache::new();
        cache.insert(make_record("R1"));
        let view = cache.replay("R1").unwrap();

        assert_eq!(view.header.case_id.as_str(), "R1");
        assert_eq!(view.header.patient_name.as_str(), "Patient R1");
        assert_eq!(view.header.generated_at.as_str(), "2024-06-01 12:00:00 UTC");
        assert_eq!(view.header.disclaimer.as_str(), REPLAY_DISCLAIMER);
        assert_eq!(view.assessment.severity_band.as_str(), "MODERATE");
        assert_eq!(view.severity_drivers[0].as_str(), "No critical factors identified");
        assert_eq!(view.notes[0].as_str(), "No additional notes");
    }

    #[test]
    fn replay_falls_back_to_record_patient_name() {
        let mut record = make_record("R2");
        record.summary = None;
        record.patient_name = "Walk-in".into();
        let cache = HistoryCache::from_records(vec![record]);

        let view = cache.replay("R2").unwrap();
        assert_eq!(view.patient.name.as_str(), "Walk-in");
        assert_eq!(view.patient.age.as_str(), "Not provided");
    }

    #[test]
    fn rows_use_dash_for_missing_cells() {
        let cache = HistoryCache::from_records(vec![HistoryRecord::default(), make_record("X")]);
        let rows = cache.rows();

        assert_eq!(rows[0].date.as_str(), "-");
        assert_eq!(rows[0].patient.as_str(), "-");
        assert_eq!(rows[0].case_id.as_str(), "-");
        assert_eq!(rows[0].severity.as_str(), "-");
        assert_eq!(rows[0].priority.as_str(), "-");

        assert_eq!(rows[1].key, "X");
        assert_eq!(rows[1].severity.as_str(), "MODERATE");
        assert_eq!(rows[1].priority.as_str(), "P3");
    }

    #[test]
    fn from_records_truncates_to_capacity() {
        let records = (0..15).map(|i| make_record(&i.to_string())).collect();
        assert_eq!(HistoryCache::from_records(records).len(), CAPACITY);
    }
}
