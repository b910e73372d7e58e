//! Display text for arbitrary JSON values.

use serde_json::Value;

use triage_contracts::scalar::display_number;

/// Render any value for a ledger cell or timestamp.
///
/// Arrays join their elements with `", "`, objects are pretty-printed, null
/// and absent values are empty. Never panics.
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Array(items)) => items.iter().map(element_text).collect::<Vec<_>>().join(", "),
        Some(object @ Value::Object(_)) => {
            serde_json::to_string_pretty(object).unwrap_or_else(|_| object.to_string())
        }
        Some(leaf) => leaf_text(leaf),
    }
}

// Array elements: nested arrays flatten with a bare comma, objects stay
// compact so one cell never spans many lines.
fn element_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(element_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
        leaf => leaf_text(leaf),
    }
}

fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => display_number(n),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_join_with_comma_space() {
        assert_eq!(format_value(Some(&json!(["fever", "cough", 3]))), "fever, cough, 3");
        assert_eq!(format_value(Some(&json!([]))), "");
    }

    #[test]
    fn objects_are_pretty_printed_with_two_space_indent() {
        let value = json!({"score": 7, "tier": "high"});
        assert_eq!(
            format_value(Some(&value)),
            "{\n  \"score\": 7,\n  \"tier\": \"high\"\n}"
        );
    }

    #[test]
    fn null_and_absent_are_empty() {
        assert_eq!(format_value(None), "");
        assert_eq!(format_value(Some(&Value::Null)), "");
    }

    #[test]
    fn leaves_use_their_natural_text() {
        assert_eq!(format_value(Some(&json!("P1"))), "P1");
        assert_eq!(format_value(Some(&json!(2.0))), "2");
        assert_eq!(format_value(Some(&json!(98.6))), "98.6");
        assert_eq!(format_value(Some(&json!(false))), "false");
    }

    #[test]
    fn nested_elements_stay_on_one_line() {
        let value = json!([[1, 2], {"a": 1}, null]);
        assert_eq!(format_value(Some(&value)), "1,2, {\"a\":1}, ");
    }
}
