//! Forgiving field deserializers for pipeline and persisted payloads.
//!
//! Each helper accepts any JSON shape. Anything unexpected maps to "absent"
//! (or the type's default) so one bad field never rejects the document
//! around it. Used via `#[serde(deserialize_with = "...")]`.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::scalar::{display_number, Scalar};

/// Scalar leaf; see [`Scalar::from_value`].
pub fn scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Scalar::from_value(value))
}

/// Text leaf. Numbers and booleans are rendered to text; blank strings,
/// null, arrays and objects are absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

/// Text leaf that must exist; absent becomes the empty string.
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// List-of-text leaf. A lone string is a one-item list; null and blank
/// elements are skipped, nested structures become compact JSON; any
/// non-list, non-string shape is absent.
pub fn text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items.into_iter().filter_map(list_item_text).collect()),
        Value::String(s) if !s.trim().is_empty() => Some(vec![s]),
        _ => None,
    })
}

/// Nested object. Non-object shapes are absent.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Any value that has a sensible default when it cannot be decoded.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A list whose elements fall back to their default individually, so the
/// list keeps its length and order even when some elements are malformed.
pub fn list_or_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// A JSON object kept as-is (key order preserved); anything else is empty.
pub fn map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// Text form of a scalar value, by the same rules as [`text`].
pub fn text_of(value: &Value) -> Option<String> {
    value_to_text(value.clone())
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(display_number(&n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn list_item_text(value: Value) -> Option<String> {
    match value {
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
        other => value_to_text(other),
    }
}
