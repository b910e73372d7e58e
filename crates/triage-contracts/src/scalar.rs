//! Scalar leaves of pipeline payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A string, number, or boolean leaf, kept in its original JSON form.
///
/// The pipeline is loosely typed: `age` may arrive as `34`, `34.0` or `"34"`.
/// Keeping the JSON form means the persisted history round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    Bool(bool),
    Text(String),
}

impl Scalar {
    /// Convert a JSON value into a scalar. Null, blank strings, arrays and
    /// objects yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Scalar::Number(n)),
            Value::Bool(b) => Some(Scalar::Bool(b)),
            Value::String(s) if !s.trim().is_empty() => Some(Scalar::Text(s)),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => f.write_str(&display_number(n)),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(Number::from(n))
    }
}

/// Render a JSON number the way a browser would: integral floats lose their
/// fractional part (`2.0` → `"2"`), everything else uses the shortest form.
pub fn display_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
