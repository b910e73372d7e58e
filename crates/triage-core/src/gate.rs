//! Single-flight guard for backend submissions.
//!
//! The gate hands out at most one outstanding `SubmissionTicket`. Each
//! ticket carries a generation number; when the session watchdog abandons a
//! submission past its deadline the slot is freed, and a late result
//! presented with the old ticket is discarded by `finish()`.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};
use uuid::Uuid;

use triage_contracts::error::{DeskError, DeskResult};

/// Proof that the holder owns the current submission slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub generation: u64,
    /// Correlates log events of one submission.
    pub id: Uuid,
}

#[derive(Debug, Default)]
struct GateState {
    generation: u64,
    in_flight: Option<u64>,
}

#[derive(Debug, Default)]
pub struct SubmissionGate {
    state: Mutex<GateState>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the submission slot.
    ///
    /// # Errors
    ///
    /// `DeskError::SubmissionInFlight` while another ticket is outstanding.
    pub fn try_begin(&self) -> DeskResult<SubmissionTicket> {
        let mut state = self.lock();
        if let Some(generation) = state.in_flight {
            warn!(generation, "submission rejected: another is in flight");
            return Err(DeskError::SubmissionInFlight);
        }

        state.generation += 1;
        state.in_flight = Some(state.generation);
        let ticket = SubmissionTicket {
            generation: state.generation,
            id: Uuid::new_v4(),
        };
        debug!(generation = ticket.generation, submission_id = %ticket.id, "submission started");
        Ok(ticket)
    }

    /// Release the slot held by `ticket`.
    ///
    /// Returns `true` when the ticket is still current, meaning its result
    /// should be rendered. A superseded ticket returns `false` and leaves the
    /// gate untouched.
    pub fn finish(&self, ticket: &SubmissionTicket) -> bool {
        let mut state = self.lock();
        if state.in_flight != Some(ticket.generation) {
            debug!(
                generation = ticket.generation,
                submission_id = %ticket.id,
                "discarding result of superseded submission"
            );
            return false;
        }
        state.in_flight = None;
        debug!(generation = ticket.generation, submission_id = %ticket.id, "submission finished");
        true
    }

    /// Give up on the outstanding submission, if any.
    pub fn abandon(&self) {
        let mut state = self.lock();
        if let Some(generation) = state.in_flight.take() {
            warn!(generation, "outstanding submission abandoned");
        }
    }

    // A poisoned lock still holds consistent state: every mutation above is
    // a single field assignment.
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_rejected_until_finish() {
        let gate = SubmissionGate::new();
        let ticket = gate.try_begin().unwrap();

        let err = gate.try_begin().unwrap_err();
        assert!(matches!(err, DeskError::SubmissionInFlight));

        assert!(gate.finish(&ticket));
        assert!(gate.try_begin().is_ok());
    }

    #[test]
    fn generations_increase_monotonically() {
        let gate = SubmissionGate::new();
        let first = gate.try_begin().unwrap();
        gate.finish(&first);
        let second = gate.try_begin().unwrap();

        assert!(second.generation > first.generation);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn stale_ticket_is_discarded_after_abandon() {
        let gate = SubmissionGate::new();
        let stale = gate.try_begin().unwrap();
        gate.abandon();

        let current = gate.try_begin().unwrap();
        assert!(!gate.finish(&stale), "superseded result must be dropped");
        assert!(
            gate.try_begin().is_err(),
            "stale finish must not release the current slot"
        );
        assert!(gate.finish(&current));
    }

    #[test]
    fn finishing_twice_reports_stale() {
        let gate = SubmissionGate::new();
        let ticket = gate.try_begin().unwrap();
        assert!(gate.finish(&ticket));
        assert!(!gate.finish(&ticket));
    }
}
