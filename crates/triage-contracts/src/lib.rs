//! # triage-contracts
//!
//! Shared types, view-models, and errors for the triage desk client.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions, lenient decoding, markup escaping and
//! error types.

pub mod error;
pub mod history;
pub mod language;
pub mod ledger;
pub mod lenient;
pub mod markup;
pub mod pipeline;
pub mod scalar;
pub mod triage;
pub mod view;
