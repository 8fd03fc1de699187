//! Semantic Analyzer: LLM-judged match score and improvement suggestions.
//!
//! Every method degrades instead of failing: when no generator is configured,
//! the call errors, or the reply has no usable JSON, the result is a zero score
//! with a placeholder message (or an empty list / fixed text for the helpers).

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::TextGenerator;
use crate::matching::pipeline::MatchResult;
use crate::matching::prompts::{
    self, ANALYSIS_PROMPT_TEMPLATE, POOL_SUMMARY_PROMPT_TEMPLATE, SKILL_ANALYSIS_PROMPT_TEMPLATE,
    SKILL_EXTRACTION_PROMPT_TEMPLATE,
};
use crate::matching::structured::{self, ParseFailure};

/// Maximum contribution of the semantic signal to the total score.
pub const SEMANTIC_WEIGHT: f64 = 50.0;

pub const UNAVAILABLE_MESSAGE: &str = "LLM not available. Check API key.";
pub const FORMAT_ERROR_MESSAGE: &str = "AI response format error.";
pub const CALL_ERROR_MESSAGE: &str = "Error during AI analysis.";
pub const NO_SUGGESTIONS_MESSAGE: &str = "No suggestions generated.";
pub const FEEDBACK_UNAVAILABLE_MESSAGE: &str = "Overall feedback is not available.";

/// Documents longer than this are cut before being embedded in a prompt.
const MAX_PROMPT_DOCUMENT_CHARS: usize = 20_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticAssessment {
    /// 0–50.
    pub score: f64,
    pub suggestions: String,
    /// Only populated when the analysis ran against a skill list.
    pub missing_skills: Vec<String>,
}

impl SemanticAssessment {
    fn fallback(message: &str) -> Self {
        Self {
            score: 0.0,
            suggestions: message.to_string(),
            missing_skills: Vec::new(),
        }
    }
}

/// Rescales a raw 0–100 model score to the semantic half of the total.
pub fn normalize_score(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0) / 100.0 * SEMANTIC_WEIGHT
}

#[derive(Clone, Default)]
pub struct SemanticAnalyzer {
    llm: Option<Arc<dyn TextGenerator>>,
}

impl SemanticAnalyzer {
    pub fn new(llm: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { llm }
    }

    pub fn is_available(&self) -> bool {
        self.llm.is_some()
    }

    /// Scores `resume_text` against `jd_text`. With `job_skills`, the model also
    /// reports which of those skills the resume lacks.
    pub async fn analyze(
        &self,
        resume_text: &str,
        jd_text: &str,
        job_skills: Option<&[String]>,
    ) -> SemanticAssessment {
        let Some(llm) = &self.llm else {
            return SemanticAssessment::fallback(UNAVAILABLE_MESSAGE);
        };

        let skills_json = job_skills
            .map(|skills| serde_json::to_string(skills).unwrap_or_default())
            .unwrap_or_default();
        let template = match job_skills {
            Some(_) => SKILL_ANALYSIS_PROMPT_TEMPLATE,
            None => ANALYSIS_PROMPT_TEMPLATE,
        };
        let prompt = prompts::fill(
            template,
            &[
                ("skills_json", skills_json.as_str()),
                ("jd_text", clip(jd_text)),
                ("resume_text", clip(resume_text)),
            ],
        );

        match llm.generate(&prompt).await {
            Ok(reply) => assessment_from_reply(&reply),
            Err(e) => {
                warn!("Semantic analysis call failed: {e}");
                SemanticAssessment::fallback(CALL_ERROR_MESSAGE)
            }
        }
    }

    /// Asks the model for the skills a job requires. Empty on any failure.
    pub async fn extract_job_skills(&self, jd_text: &str) -> Vec<String> {
        let Some(llm) = &self.llm else {
            return Vec::new();
        };

        let prompt = prompts::fill(SKILL_EXTRACTION_PROMPT_TEMPLATE, &[("jd_text", clip(jd_text))]);
        let reply = match llm.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Skill extraction call failed: {e}");
                return Vec::new();
            }
        };

        let raw: Vec<Value> = structured::parse_array_or(&reply, Vec::new());
        let mut skills: Vec<String> = raw
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        skills.sort();
        skills.dedup();
        debug!("Extracted {} job skills", skills.len());
        skills
    }

    /// One free-text assessment of the whole candidate pool.
    pub async fn summarize_pool(
        &self,
        jd_text: &str,
        job_skills: &[String],
        results: &[MatchResult],
    ) -> String {
        let Some(llm) = &self.llm else {
            return FEEDBACK_UNAVAILABLE_MESSAGE.to_string();
        };
        if results.is_empty() {
            return "No resumes could be evaluated.".to_string();
        }

        let candidates: Vec<String> = results
            .iter()
            .map(|r| {
                format!(
                    "- {} ({}): score {}/100, verdict {:?}, missing: {}",
                    r.candidate_name, r.resume_name, r.score, r.verdict, r.missing_skills_formatted
                )
            })
            .collect();

        let prompt = prompts::fill(
            POOL_SUMMARY_PROMPT_TEMPLATE,
            &[
                ("skills", job_skills.join(", ").as_str()),
                ("candidates", candidates.join("\n").as_str()),
                ("jd_text", clip(jd_text)),
            ],
        );

        match llm.generate(&prompt).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => FEEDBACK_UNAVAILABLE_MESSAGE.to_string(),
            Err(e) => {
                warn!("Pool summary call failed: {e}");
                FEEDBACK_UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }
}

fn assessment_from_reply(reply: &str) -> SemanticAssessment {
    let value: Value = match structured::parse_object(reply) {
        Ok(value) => value,
        Err(ParseFailure::NotFound) => {
            warn!("AI response did not contain JSON");
            return SemanticAssessment::fallback(FORMAT_ERROR_MESSAGE);
        }
        Err(ParseFailure::Invalid) => {
            warn!("AI response contained malformed JSON");
            return SemanticAssessment::fallback(FORMAT_ERROR_MESSAGE);
        }
    };

    let raw_score = structured::number_field(&value, "score").unwrap_or(0.0);
    let mut missing_skills: Vec<String> = structured::string_list_field(&value, "missing_skills")
        .into_iter()
        .map(|s| s.to_lowercase())
        .collect();
    missing_skills.sort();
    missing_skills.dedup();

    SemanticAssessment {
        score: normalize_score(raw_score),
        suggestions: structured::text_field(&value, "suggestions")
            .unwrap_or_else(|| NO_SUGGESTIONS_MESSAGE.to_string()),
        missing_skills,
    }
}

/// Cuts `text` to at most `MAX_PROMPT_DOCUMENT_CHARS` characters.
fn clip(text: &str) -> &str {
    match text.char_indices().nth(MAX_PROMPT_DOCUMENT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
