//! Best-effort structured-response parser.
//!
//! Model output is expected to be a single JSON object or array, but may carry
//! prose or markdown fences around it. The parser takes the widest `{...}` /
//! `[...]` span in the text and deserializes it. When no span exists or it does
//! not deserialize, callers either get a `ParseFailure` naming the cause or the
//! fallback value they passed in.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"));
static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid array regex"));

/// Why a response could not be turned into the requested shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// No `{...}` / `[...]` span in the text.
    NotFound,
    /// A span was found but is not valid JSON of the requested type.
    Invalid,
}

pub fn find_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

pub fn find_json_array(text: &str) -> Option<&str> {
    JSON_ARRAY.find(text).map(|m| m.as_str())
}

/// Parses the JSON object embedded in `text`.
pub fn parse_object<T: DeserializeOwned>(text: &str) -> Result<T, ParseFailure> {
    let span = find_json_object(text).ok_or(ParseFailure::NotFound)?;
    deserialize_span(span)
}

/// Parses the JSON array embedded in `text`.
pub fn parse_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ParseFailure> {
    let span = find_json_array(text).ok_or(ParseFailure::NotFound)?;
    deserialize_span(span)
}

pub fn parse_array_or<T: DeserializeOwned>(text: &str, fallback: Vec<T>) -> Vec<T> {
    parse_array(text).unwrap_or(fallback)
}

fn deserialize_span<T: DeserializeOwned>(span: &str) -> Result<T, ParseFailure> {
    serde_json::from_str::<T>(span).map_err(|e| {
        debug!("Model response span is not valid JSON: {e}");
        ParseFailure::Invalid
    })
}

/// Reads a numeric field that may arrive as a number or a numeric string.
pub fn number_field(value: &Value, key: &str) -> Option<f64> {
    let number = match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Reads a text field that may arrive as a string or a list of strings.
/// List items are rendered as `- item` lines.
pub fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let lines: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    if s.starts_with('-') || s.starts_with('•') {
                        s.to_string()
                    } else {
                        format!("- {s}")
                    }
                })
                .collect();
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        _ => None,
    }
}

/// Reads a list of non-blank strings; anything else yields an empty list.
pub fn string_list_field(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_with_surrounding_prose() {
        let text = "Sure! Here you go:\n{\"score\": 75, \"suggestions\": \"- add AWS\"}\nHope that helps.";
        let value: Value = parse_object(text).unwrap();
        assert_eq!(value["score"], 75);
    }

    #[test]
    fn test_object_inside_markdown_fence() {
        let text = "```json\n{\"key\": \"value\"}\n```";
        let value: Value = parse_object(text).unwrap();
        assert_eq!(value, json!({"key": "value"}));
    }

    #[test]
    fn test_object_span_is_greedy() {
        let text = r#"{"outer": {"inner": 1}} trailing"#;
        assert_eq!(find_json_object(text), Some(r#"{"outer": {"inner": 1}}"#));
    }

    #[test]
    fn test_no_json_is_not_found() {
        let result = parse_object::<Value>("The candidate looks strong.");
        assert_eq!(result.unwrap_err(), ParseFailure::NotFound);
    }

    #[test]
    fn test_malformed_json_is_invalid() {
        let result = parse_object::<Value>("{score: seventy}");
        assert_eq!(result.unwrap_err(), ParseFailure::Invalid);
    }

    #[test]
    fn test_array_fallback() {
        let skills: Vec<String> = parse_array_or("no list here", vec!["fallback".to_string()]);
        assert_eq!(skills, vec!["fallback"]);

        let skills: Vec<String> = parse_array_or("Skills: [\"Rust\", \"SQL\"]", Vec::new());
        assert_eq!(skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_number_field_accepts_numeric_strings() {
        let value = json!({"a": 80, "b": " 42 ", "c": "high", "d": null});
        assert_eq!(number_field(&value, "a"), Some(80.0));
        assert_eq!(number_field(&value, "b"), Some(42.0));
        assert_eq!(number_field(&value, "c"), None);
        assert_eq!(number_field(&value, "d"), None);
        assert_eq!(number_field(&value, "missing"), None);
    }

    #[test]
    fn test_text_field_joins_lists_as_bullets() {
        let value = json!({"s": ["Add AWS", "- Quantify impact", ""]});
        assert_eq!(
            text_field(&value, "s").as_deref(),
            Some("- Add AWS\n- Quantify impact")
        );
        assert_eq!(text_field(&json!({"s": "   "}), "s"), None);
        assert_eq!(text_field(&json!({"s": 3}), "s"), None);
    }

    #[test]
    fn test_string_list_field_skips_non_strings() {
        let value = json!({"skills": ["Rust", 3, " ", " Go "]});
        assert_eq!(string_list_field(&value, "skills"), vec!["Rust", "Go"]);
        assert!(string_list_field(&json!({"skills": "Rust"}), "skills").is_empty());
    }
}
