//! # triage-core
//!
//! The seams of the triage desk client.
//!
//! This crate provides:
//! - The two collaborator traits (`TriagePipeline`, `StateStore`)
//! - The `SubmissionGate` that keeps at most one backend call outstanding
//!
//! ## Usage
//!
//! ```rust,ignore
//! use triage_core::{SubmissionGate, traits::{StateStore, TriagePipeline}};
//! ```

pub mod gate;
pub mod traits;

pub use gate::{SubmissionGate, SubmissionTicket};
