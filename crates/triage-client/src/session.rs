//! The triage session: intake → pipeline → view-models → history.

use std::{
    sync::{
        mpsc::{self, RecvTimeoutError},
        Arc,
    },
    thread,
    time::Duration,
};

use tracing::{info, warn};

use triage_contracts::{
    error::{DeskError, DeskResult},
    history::HistoryRecord,
    language::Language,
    pipeline::{IntakeRequest, PipelineResponse},
    view::{DecisionView, HistoryRow, LedgerViewModel, ReportViewModel},
};
use triage_core::{traits::TriagePipeline, SubmissionGate, SubmissionTicket};
use triage_history::ClientState;
use triage_report::{assemble, assembler::resolve_patient_name, build_decision, format_ledger};

use crate::intake::IntakeForm;

/// Extra time the watchdog grants on top of the HTTP request timeout.
pub const DEADLINE_GRACE: Duration = Duration::from_secs(5);

/// Everything a renderer needs after one completed submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TriageOutcome {
    pub report: ReportViewModel,
    pub ledger: LedgerViewModel,
    pub decision: DecisionView,
}

/// Owns the pipeline, the submission gate and the persisted client state.
pub struct TriageSession {
    pipeline: Arc<dyn TriagePipeline>,
    gate: SubmissionGate,
    state: ClientState,
    deadline: Option<Duration>,
}

impl TriageSession {
    pub fn new(pipeline: Box<dyn TriagePipeline>, state: ClientState) -> Self {
        Self {
            pipeline: Arc::from(pipeline),
            gate: SubmissionGate::new(),
            state,
            deadline: None,
        }
    }

    /// Abandon any pipeline call still running after `deadline`.
    ///
    /// The call then runs on a worker thread; when the deadline passes the
    /// gate is released and the late result is dropped unseen.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Run one triage.
    ///
    /// Validation happens before the gate is claimed, so an invalid form
    /// never reaches the pipeline. On success the case is added to the
    /// history; a history write failure is logged and does not fail the
    /// submission.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the form is incomplete
    /// - `SubmissionInFlight` when another submission is outstanding
    /// - `Transport`, `Backend`, `MalformedResponse` from the pipeline, and
    ///   `Transport` when the deadline passed before the pipeline answered
    pub fn submit(&mut self, form: &IntakeForm) -> DeskResult<TriageOutcome> {
        let request = form.validate()?;
        let ticket = self.gate.try_begin()?;

        let result = self.call_pipeline(&request, &ticket);
        let current = self.gate.finish(&ticket);
        let response = result?;
        if !current {
            return Err(DeskError::Transport {
                reason: "submission was abandoned before the response arrived".to_string(),
            });
        }

        let report = &response.decision.report;
        let patient_name = resolve_patient_name(
            report.summary.as_ref().and_then(|s| s.patient_name.as_deref()),
            Some(&request.patient_name),
        );
        let trace = if response.ledger.is_empty() {
            &report.ledger
        } else {
            &response.ledger
        };

        let outcome = TriageOutcome {
            report: assemble(report, Some(&request.patient_name)),
            ledger: format_ledger(trace),
            decision: build_decision(&response.decision),
        };

        info!(
            submission_id = %ticket.id,
            case_id = %outcome.decision.case_id,
            severity = %outcome.decision.severity_band,
            priority = %outcome.decision.priority,
            ledger_entries = outcome.ledger.entries.len(),
            "triage completed"
        );

        if let Err(e) = self.state.record_case(HistoryRecord::from_result(report, patient_name)) {
            warn!(error = %e, "case completed but history was not saved");
        }
        Ok(outcome)
    }

    fn call_pipeline(
        &self,
        request: &IntakeRequest,
        ticket: &SubmissionTicket,
    ) -> DeskResult<PipelineResponse> {
        let Some(deadline) = self.deadline else {
            return self.pipeline.submit(request);
        };

        let (tx, rx) = mpsc::channel();
        let pipeline = Arc::clone(&self.pipeline);
        let request = request.clone();
        thread::spawn(move || {
            // The receiver is gone once the watchdog fired.
            let _ = tx.send(pipeline.submit(&request));
        });

        match rx.recv_timeout(deadline) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    submission_id = %ticket.id,
                    deadline_ms = deadline.as_millis() as u64,
                    "pipeline call exceeded its deadline"
                );
                self.gate.abandon();
                Err(DeskError::Transport {
                    reason: format!("no response within {} ms", deadline.as_millis()),
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(DeskError::Transport {
                reason: "pipeline worker exited without a response".to_string(),
            }),
        }
    }

    /// Rebuild the report of a stored case; `None` when the id is unknown.
    pub fn replay(&self, case_id: &str) -> Option<ReportViewModel> {
        self.state.history().replay(case_id)
    }

    /// Decision panel of a stored case. The community plan is not kept.
    pub fn replay_decision(&self, case_id: &str) -> Option<DecisionView> {
        self.state.history().replay_decision(case_id)
    }

    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.state.history().rows()
    }

    pub fn language(&self) -> Language {
        self.state.language()
    }

    pub fn set_language(&mut self, language: Language) -> DeskResult<()> {
        self.state.set_language(language)
    }
}
