//! Markup-safe text.
//!
//! Every text leaf of a view-model is a `SafeText`. The only constructor
//! escapes its input, so a `SafeText` can be written into HTML verbatim and
//! no renderer ever interpolates raw pipeline or patient text.

use std::fmt;

use serde::Serialize;

/// Text that has been escaped for markup exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SafeText(String);

impl SafeText {
    /// Escape `raw` and wrap it.
    pub fn escape(raw: impl AsRef<str>) -> Self {
        Self(escape_markup(raw.as_ref()))
    }

    /// The escaped form, safe to emit into HTML as-is.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to the original text for non-markup sinks (terminals).
    pub fn to_plain(&self) -> String {
        unescape_markup(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace the five markup-significant characters with entities.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

// `&amp;` goes last so "&amp;lt;" decodes to "&lt;", not "<".
fn unescape_markup(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
