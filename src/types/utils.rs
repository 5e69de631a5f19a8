//! Shared utility functions for lenient JSON extraction and string handling.
//!
//! ## JSON Extraction Helpers
//!
//! LLM output is loosely typed: a "revenue" field may arrive as `"$3.2bn"`,
//! `3200000000` or `null`. These helpers read `serde_json::Value` without
//! failing:
//! - `json_text` - strings, numbers and booleans rendered as text
//! - `json_string_array` - string arrays (scalars coerced, objects skipped)

use serde_json::Value;

// =============================================================================
// JSON Value Extraction Helpers
// =============================================================================

/// Extract a scalar as text: strings verbatim, numbers and booleans formatted.
pub fn json_text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_text)
}

/// Render a scalar JSON value as text. Arrays, objects and null yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Extract string array from JSON value by key.
#[inline]
pub fn json_string_array(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

/// Get an object-valued field, or `None` when absent or not an object.
#[inline]
pub fn json_object<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| v.is_object())
}

/// Get an array-valued field as a slice, empty when absent.
#[inline]
pub fn json_array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

// =============================================================================
// String Utilities
// =============================================================================

/// Capitalize the first character of a string.
#[inline]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Truncate to at most `max_chars` characters, appending a marker when cut.
pub fn truncate_chars(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let mut truncated: String = content.chars().take(max_chars).collect();
    truncated.push_str("\n...(truncated)");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_text_trims_and_skips_blank() {
        let v = json!({"a": "  hello ", "b": "   ", "c": [1]});
        assert_eq!(json_text(&v, "a").as_deref(), Some("hello"));
        assert_eq!(json_text(&v, "b"), None);
        assert_eq!(json_text(&v, "c"), None);
        assert_eq!(json_text(&v, "missing"), None);
    }

    #[test]
    fn test_json_text_coerces_scalars() {
        let v = json!({"revenue": 3200000000u64, "listed": true, "rating": "BBB+", "x": null});
        assert_eq!(json_text(&v, "revenue").as_deref(), Some("3200000000"));
        assert_eq!(json_text(&v, "listed").as_deref(), Some("true"));
        assert_eq!(json_text(&v, "rating").as_deref(), Some("BBB+"));
        assert_eq!(json_text(&v, "x"), None);
    }

    #[test]
    fn test_json_string_array_filters_objects() {
        let v = json!({"items": ["a", 2, {"nested": true}, "", "b"]});
        assert_eq!(json_string_array(&v, "items"), vec!["a", "2", "b"]);
        assert!(json_string_array(&v, "missing").is_empty());
    }

    #[test]
    fn test_json_array_and_object() {
        let v = json!({"list": [1, 2], "obj": {"k": 1}, "str": "s"});
        assert_eq!(json_array(&v, "list").len(), 2);
        assert!(json_array(&v, "str").is_empty());
        assert!(json_object(&v, "obj").is_some());
        assert!(json_object(&v, "list").is_none());
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("financial"), "Financial");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        let cut = truncate_chars("abcdefghij", 4);
        assert!(cut.starts_with("abcd"));
        assert!(cut.ends_with("(truncated)"));
    }
}
