//! Field extraction helpers for JSON request bodies
//!
//! Bodies are parsed leniently: an unreadable body behaves like an empty
//! object so that every caller sees a field-level validation failure rather
//! than a framework parse error.

use serde_json::Value;

/// Parse raw request bytes into a JSON value
///
/// Empty or non-JSON bodies yield `Value::Null`, which has no fields.
#[must_use]
pub fn parse_json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        if !bytes.is_empty() {
            log::debug!("Request body is not valid JSON: {e}");
        }
        Value::Null
    })
}

/// Extract a required text field
///
/// Returns `None` when the field is missing, not a string, or whitespace-only.
/// The returned text is not trimmed.
#[must_use]
pub fn extract_required_text(data: &Value, field_name: &str) -> Option<String> {
    data.get(field_name)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(ToString::to_string)
}

/// Extract a required non-empty list of text values
///
/// Every entry must be a non-blank string; a single bad entry makes the whole
/// field count as missing. Entries are returned as supplied.
#[must_use]
pub fn extract_required_text_list(data: &Value, field_name: &str) -> Option<Vec<String>> {
    let entries = data.get(field_name).and_then(Value::as_array)?;
    if entries.is_empty() {
        return None;
    }

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .filter(|text| !text.trim().is_empty())
                .map(ToString::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unparseable_body_has_no_fields() {
        assert_eq!(parse_json_body(b""), Value::Null);
        assert_eq!(parse_json_body(b"description=signup"), Value::Null);
        assert_eq!(extract_required_text(&Value::Null, "description"), None);
    }

    #[test]
    fn test_required_text() {
        let data = json!({ "description": " user signup ", "blank": "   ", "count": 3 });
        assert_eq!(
            extract_required_text(&data, "description"),
            Some(" user signup ".to_string())
        );
        assert_eq!(extract_required_text(&data, "blank"), None);
        assert_eq!(extract_required_text(&data, "count"), None);
        assert_eq!(extract_required_text(&data, "missing"), None);
    }

    #[test]
    fn test_required_text_list() {
        let data = json!({
            "sources": ["invoices", "clients"],
            "mixed": ["invoices", 2024, { "table": "clients" }],
            "with_blank": ["invoices", "  "],
            "empty": [],
            "scalar": "invoices"
        });
        assert_eq!(
            extract_required_text_list(&data, "sources"),
            Some(vec!["invoices".to_string(), "clients".to_string()])
        );
        assert_eq!(extract_required_text_list(&data, "mixed"), None);
        assert_eq!(extract_required_text_list(&data, "with_blank"), None);
        assert_eq!(extract_required_text_list(&data, "empty"), None);
        assert_eq!(extract_required_text_list(&data, "scalar"), None);
        assert_eq!(extract_required_text_list(&data, "missing"), None);
    }
}
