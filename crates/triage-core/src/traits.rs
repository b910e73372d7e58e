//! Collaborator traits.
//!
//! - `TriagePipeline` — the remote multi-agent pipeline (one request, one response)
//! - `StateStore`     — durable key/value storage for client preferences and history
//!
//! Both are object-safe and `Send + Sync` so a session can hold them boxed.

use triage_contracts::{
    error::DeskResult,
    pipeline::{IntakeRequest, PipelineResponse},
};

/// The remote triage pipeline.
pub trait TriagePipeline: Send + Sync {
    /// Submit one validated intake and wait for the decision.
    ///
    /// A returned `Ok` may still carry a partial or malformed report; that is
    /// the assembler's problem, not an error. `Err` means the submission
    /// failed as a whole (transport, status, or non-JSON body).
    fn submit(&self, request: &IntakeRequest) -> DeskResult<PipelineResponse>;
}

/// Durable string storage addressed by a fixed key.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when nothing was saved.
    fn load(&self, key: &str) -> DeskResult<Option<String>>;

    /// Replace the value under `key`. Readers never observe a partial write.
    fn save(&self, key: &str, value: &str) -> DeskResult<()>;
}
