//! Raw explainability-ledger entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// One agent invocation in the pipeline trace.
///
/// `output` normally carries `agent` and `timestamp` plus whatever fields the
/// agent chose to report. Its key order is kept exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerEntry {
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,

    #[serde(deserialize_with = "lenient::map")]
    pub output: Map<String, Value>,
}

impl LedgerEntry {
    /// The `agent` key as text. Numbers and booleans are rendered; blank
    /// strings and structured values are absent.
    pub fn agent(&self) -> Option<String> {
        self.output.get("agent").and_then(lenient::text_of)
    }

    pub fn timestamp(&self) -> Option<&Value> {
        self.output.get("timestamp")
    }
}
