//! # triage-client
//!
//! The outer layer of the triage desk: configuration, the HTTP pipeline
//! client, intake validation, and the `TriageSession` that wires intake,
//! pipeline, presentation and history together.

pub mod config;
pub mod http;
pub mod intake;
pub mod session;

pub use config::ClientConfig;
pub use http::HttpPipeline;
pub use intake::IntakeForm;
pub use session::{TriageOutcome, TriageSession};
