//! Hard-Match Scorer: deterministic skill overlap between a resume and a job.
//!
//! Two variants share one output type:
//! - `score_against_vocabulary`: job skills are the vocabulary terms found in the JD.
//! - `score_against_required`: job skills are an explicit list (e.g. LLM-extracted).
//!
//! Both yield `score = |matched| / |job skills| * 50`, and 0 when there are no job skills.

use std::collections::BTreeSet;

use regex::Regex;
use serde::Serialize;

use crate::matching::vocabulary::skills_in;

/// Maximum contribution of the hard-match signal to the total score.
pub const HARD_MATCH_WEIGHT: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HardMatch {
    pub score: f64,
    /// Sorted, lowercase.
    pub matched: Vec<String>,
    /// Sorted, lowercase.
    pub missing: Vec<String>,
}

impl HardMatch {
    fn from_partition(required: &BTreeSet<String>, present: &BTreeSet<String>) -> Self {
        if required.is_empty() {
            return Self::default();
        }
        let matched: Vec<String> = required.intersection(present).cloned().collect();
        let missing: Vec<String> = required.difference(present).cloned().collect();
        let score = matched.len() as f64 / required.len() as f64 * HARD_MATCH_WEIGHT;
        Self {
            score,
            matched,
            missing,
        }
    }
}

/// Vocabulary variant.
pub fn score_against_vocabulary(resume_text: &str, jd_text: &str) -> HardMatch {
    let jd_skills = skills_in(jd_text);
    if jd_skills.is_empty() {
        return HardMatch::default();
    }
    let resume_skills = skills_in(resume_text);
    HardMatch::from_partition(&jd_skills, &resume_skills)
}

/// Explicit-skill-list variant. Skills are compared case-insensitively as whole
/// words; blank and duplicate entries are ignored.
pub fn score_against_required(resume_text: &str, required: &[String]) -> HardMatch {
    let required: BTreeSet<String> = required
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let present: BTreeSet<String> = required
        .iter()
        .filter(|skill| contains_whole_word(resume_text, skill))
        .cloned()
        .collect();

    HardMatch::from_partition(&required, &present)
}

/// Literal, case-insensitive match bounded by text edges or non-word characters,
/// so terms like `c++` and `.net` are matched as written.
fn contains_whole_word(text: &str, term: &str) -> bool {
    let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(term));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => text.to_lowercase().contains(term),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_python_only_resume_scores_half() {
        let jd = "We need Python and SQL experience.";
        let resume = "Senior Python developer.";
        let result = score_against_vocabulary(resume, jd);
        assert_eq!(result.matched, vec!["python"]);
        assert_eq!(result.missing, vec!["sql"]);
        assert!((result.score - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_vocabulary_skills_in_jd_scores_zero() {
        let result = score_against_vocabulary("Python, SQL, Docker", "Friendly barista wanted");
        assert_eq!(result, HardMatch::default());
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_disjoint_skills_score_zero_but_list_missing() {
        let result = score_against_vocabulary("Excel wizard", "Docker and AWS required");
        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
        assert_eq!(result.missing, vec!["aws", "docker"]);
    }

    #[test]
    fn test_full_overlap_scores_fifty() {
        let result = score_against_vocabulary(
            "React, JavaScript and Git daily",
            "Looking for react + javascript + git",
        );
        assert_eq!(result.score, HARD_MATCH_WEIGHT);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_vocabulary_partition_covers_jd_skills() {
        let jd = "python java sql docker aws machine learning teamwork";
        let resume = "java, aws, Machine Learning";
        let result = score_against_vocabulary(resume, jd);
        let jd_skills = skills_in(jd);

        let matched: BTreeSet<String> = result.matched.iter().cloned().collect();
        let missing: BTreeSet<String> = result.missing.iter().cloned().collect();
        assert!(matched.is_disjoint(&missing));
        let union: BTreeSet<String> = matched.union(&missing).cloned().collect();
        assert_eq!(union, jd_skills);
        assert!(result.score >= 0.0 && result.score <= HARD_MATCH_WEIGHT);
    }

    #[test]
    fn test_required_list_case_insensitive_whole_word() {
        let required = skills(&["Rust", "Kubernetes", "Go"]);
        let result = score_against_required("Built RUST services; deployed with kubernetes.", &required);
        assert_eq!(result.matched, vec!["kubernetes", "rust"]);
        assert_eq!(result.missing, vec!["go"]);
        assert!((result.score - 50.0 * 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_required_list_does_not_match_inside_words() {
        let required = skills(&["go"]);
        let result = score_against_required("Google ads and going places", &required);
        assert!(result.matched.is_empty());
        assert_eq!(result.missing, vec!["go"]);
    }

    #[test]
    fn test_required_list_matches_symbol_terms() {
        let required = skills(&["C++", ".NET"]);
        let result = score_against_required("Languages: C++, C#, .NET Core", &required);
        assert_eq!(result.matched, vec![".net", "c++"]);
        assert_eq!(result.score, HARD_MATCH_WEIGHT);
    }

    #[test]
    fn test_empty_required_list_scores_zero() {
        let result = score_against_required("anything", &[]);
        assert_eq!(result, HardMatch::default());

        let blanks = skills(&["  ", ""]);
        assert_eq!(score_against_required("anything", &blanks), HardMatch::default());
    }

    #[test]
    fn test_required_list_dedups_entries() {
        let required = skills(&["SQL", "sql ", "Python"]);
        let result = score_against_required("sql only", &required);
        assert_eq!(result.matched, vec!["sql"]);
        assert_eq!(result.missing, vec!["python"]);
        assert_eq!(result.score, 25.0);
    }
}
