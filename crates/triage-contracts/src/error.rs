//! Error types for the triage desk client.
//!
//! Only terminal failures live here: bad intake, a rejected or failed
//! submission, and storage/configuration problems. Partial or malformed
//! pipeline output is never an error; the report assembler absorbs it.

use thiserror::Error;

/// The unified error type for the triage desk crates.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Required intake fields are missing or not numeric. No request was sent.
    #[error("invalid intake: missing or non-numeric fields: {}", fields.join(", "))]
    InvalidInput { fields: Vec<String> },

    /// A submission is already outstanding.
    #[error("a triage submission is already in flight")]
    SubmissionInFlight,

    /// The request never produced an HTTP response (connect error, timeout).
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    /// The pipeline answered with a non-success status.
    #[error("triage backend returned HTTP {status}")]
    Backend { status: u16 },

    /// The pipeline answered 2xx but the body was not JSON.
    #[error("malformed pipeline response: {reason}")]
    MalformedResponse { reason: String },

    /// The persisted state could not be read or written.
    #[error("state storage error: {reason}")]
    Storage { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A language code outside the supported set.
    #[error("unsupported language {code:?}; expected en, hi or kn")]
    UnsupportedLanguage { code: String },

    /// A rendered result could not be encoded for output.
    #[error("failed to encode output: {reason}")]
    Output { reason: String },
}

impl DeskError {
    /// Short status line for the presentation layer.
    pub fn status_message(&self) -> &'static str {
        match self {
            DeskError::InvalidInput { .. } => "Please fill in all required fields.",
            DeskError::SubmissionInFlight => "A triage request is already running.",
            DeskError::Transport { .. }
            | DeskError::Backend { .. }
            | DeskError::MalformedResponse { .. } => "Failed. Check inputs or backend status.",
            DeskError::Storage { .. } => "Case history could not be saved.",
            DeskError::ConfigError { .. } => "Client configuration is invalid.",
            DeskError::UnsupportedLanguage { .. } => "Unsupported language. Use en, hi or kn.",
            DeskError::Output { .. } => "The result could not be printed.",
        }
    }
}

/// Convenience alias used throughout the triage desk crates.
pub type DeskResult<T> = Result<T, DeskError>;
