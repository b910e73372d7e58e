//! # triage-report
//!
//! The report and ledger presentation layer: turns raw, partially populated
//! pipeline output into complete, escaped view-models.
//!
//! - [`value::format_value`] renders any JSON value as display text
//! - [`assembler::assemble`] builds the clinical report view-model
//! - [`ledger::format_ledger`] builds one disclosure section per agent
//! - [`decision::build_decision`] builds the headline decision panel
//!
//! None of these can fail: malformed input degrades to placeholders.

pub mod assembler;
pub mod decision;
pub mod ledger;
pub mod value;

pub use assembler::assemble;
pub use decision::build_decision;
pub use ledger::format_ledger;
pub use value::format_value;
