//! Best-effort candidate identification from resume text.

use std::sync::LazyLock;

use regex::Regex;

/// Reported when a field cannot be found.
pub const UNKNOWN: &str = "N/A";

/// Number of leading non-empty lines searched for a name.
const NAME_SCAN_LINES: usize = 5;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").expect("valid email regex")
});
static FULL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+$").expect("valid name regex")
});

/// First email address anywhere in the text.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First of the leading non-empty lines that reads like "First Last".
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| FULL_NAME.is_match(line))
        .map(str::to_string)
}
