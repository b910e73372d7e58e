//! UI language preference.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Kn,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Kn];

    /// The persisted code: `en`, `hi` or `kn`.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Kn => "kn",
        }
    }

    /// Parse a persisted code. Surrounding whitespace and case are ignored;
    /// unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "kn" => Some(Language::Kn),
            _ => None,
        }
    }

    /// The next language in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::Kn,
            Language::Kn => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
