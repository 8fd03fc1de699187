//! Static skill vocabulary and tokenizer used for deterministic lexical matching.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

pub const KNOWN_SKILLS: &[&str] = &[
    "python",
    "java",
    "sql",
    "excel",
    "machine learning",
    "deep learning",
    "communication",
    "teamwork",
    "project management",
    "docker",
    "aws",
    "javascript",
    "react",
    "nodejs",
    "git",
    "linux",
];

pub const STOP_WORDS: &[&str] = &[
    "and", "the", "of", "in", "to", "a", "with", "for", "on", "is", "are", "that", "by", "as",
    "this", "an", "or", "at", "from", "it", "be", "which", "you", "we",
];

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Lowercase word tokens of `text`, stop-words removed.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Vocabulary skills present in `text`.
///
/// Single-word skills come from the token set; multi-word skills are matched as
/// whole phrases, with any run of whitespace between their words.
pub fn skills_in(text: &str) -> BTreeSet<String> {
    let tokens = tokenize(text);
    let words: Vec<String> = {
        let lower = text.to_lowercase();
        WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
    };

    KNOWN_SKILLS
        .iter()
        .filter(|skill| {
            let parts: Vec<&str> = skill.split_whitespace().collect();
            match parts.as_slice() {
                [single] => tokens.contains(*single),
                phrase => words
                    .windows(phrase.len())
                    .any(|window| window.iter().zip(phrase).all(|(w, p)| w == p)),
            }
        })
        .map(|s| s.to_string())
        .collect()
}
