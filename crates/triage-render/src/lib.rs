//! # triage-render
//!
//! Sinks for the triage desk view-models: HTML strings, plain terminal text,
//! and the localized labels both use. Renderers consume view-models only.

pub mod html;
pub mod labels;
pub mod text;

pub use html::{render_decision_html, render_history_html, render_ledger_html, render_report_html};
pub use labels::{label, UiLabel};
pub use text::{render_decision_text, render_history_text, render_ledger_text, render_report_text};
