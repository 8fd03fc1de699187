//! Request Orchestrator: decodes the job description once, then scores each
//! resume in turn: decode → extract → identify → hard match → semantic → combine.
//!
//! Resumes are isolated from each other: a malformed, undecodable, unsupported
//! or empty entry is logged and skipped, and the rest of the batch continues.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{self, DocumentFormat, ExtractionError};
use crate::matching::candidate::{extract_email, extract_name, UNKNOWN};
use crate::matching::combiner::{combine, Verdict};
use crate::matching::hard_match::{score_against_required, score_against_vocabulary, HardMatch};
use crate::matching::semantic::SemanticAnalyzer;
use crate::matching::vocabulary::skills_in;

pub const MISSING_INPUT_MESSAGE: &str = "Missing job description or resume";
pub const UNREADABLE_JD_MESSAGE: &str = "Could not extract text from job description";

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

/// Where the job's skill list comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Vocabulary terms found in the JD; responds with a bare result array.
    #[default]
    Vocabulary,
    /// LLM-extracted JD skills; responds with results, skills and pool feedback.
    ExtractedSkills,
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "vocabulary" => Ok(ScoringMode::Vocabulary),
            "extracted_skills" => Ok(ScoringMode::ExtractedSkills),
            other => Err(format!("unknown scoring mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Inline text, or a `data:<mime>;base64,<payload>` document.
    #[serde(default)]
    pub job_description: Option<String>,
    /// Batch form. Entries are parsed one by one so a bad entry only skips itself.
    #[serde(default)]
    pub resumes: Option<Vec<Value>>,
    /// Single-resume form.
    #[serde(default)]
    pub resume: Option<Value>,
    /// Overrides the configured scoring mode for this request.
    #[serde(default)]
    pub mode: Option<ScoringMode>,
}

impl AnalyzeRequest {
    fn uploads(self) -> Option<Vec<Value>> {
        match (self.resumes, self.resume) {
            (Some(mut many), Some(one)) => {
                many.push(one);
                Some(many)
            }
            (Some(many), None) => Some(many),
            (None, Some(one)) => Some(vec![one]),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub resume_name: String,
    pub candidate_name: String,
    pub candidate_email: String,
    /// 0–100.
    pub score: u32,
    pub verdict: Verdict,
    pub hard_score: f64,
    pub semantic_score: f64,
    pub matched_skills: Vec<String>,
    pub matched_skills_formatted: String,
    pub missing_skills: Vec<String>,
    pub missing_skills_formatted: String,
    pub suggestions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReport {
    pub results: Vec<MatchResult>,
    pub job_description_skills: Vec<String>,
    pub overall_feedback: String,
}

/// Response body; its shape follows the scoring mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Ranked(Vec<MatchResult>),
    Detailed(DetailedReport),
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub mode: ScoringMode,
    pub max_document_bytes: usize,
}

/// Why a single resume produced no result.
#[derive(Debug, Error)]
enum SkipReason {
    #[error("malformed entry: {0}")]
    Malformed(String),

    #[error(transparent)]
    Decode(#[from] ExtractionError),

    #[error("no text could be extracted")]
    EmptyText,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Scores every resume in `request` against its job description.
///
/// Fails only on structurally invalid input: a missing job description or
/// resume field, or an unreadable job description in `ExtractedSkills` mode.
pub async fn analyze(
    analyzer: &SemanticAnalyzer,
    options: PipelineOptions,
    request: AnalyzeRequest,
) -> Result<AnalysisResponse, AppError> {
    let jd_input = request
        .job_description
        .clone()
        .filter(|jd| !jd.trim().is_empty());
    let (Some(jd_input), Some(uploads)) = (jd_input, request.uploads()) else {
        return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
    };

    let jd_text = decode_job_description(&jd_input, options.max_document_bytes).await;
    if jd_text.trim().is_empty() {
        match options.mode {
            ScoringMode::Vocabulary => {
                warn!("Job description has no readable text; scoring is degraded")
            }
            ScoringMode::ExtractedSkills => {
                return Err(AppError::Validation(UNREADABLE_JD_MESSAGE.to_string()))
            }
        }
    }

    let job_skills = match options.mode {
        ScoringMode::Vocabulary => None,
        ScoringMode::ExtractedSkills => Some(resolve_job_skills(analyzer, &jd_text).await),
    };

    info!(
        "Analyzing {} resume(s) in {:?} mode",
        uploads.len(),
        options.mode
    );

    let mut results = Vec::with_capacity(uploads.len());
    for (index, upload) in uploads.into_iter().enumerate() {
        match evaluate_resume(
            analyzer,
            upload,
            &jd_text,
            job_skills.as_deref(),
            options.max_document_bytes,
        )
        .await
        {
            Ok(result) => results.push(result),
            Err(reason) => warn!("Skipping resume #{index}: {reason}"),
        }
    }

    // Stable: equal scores keep submission order.
    results.sort_by(|a, b| b.score.cmp(&a.score));

    match job_skills {
        None => Ok(AnalysisResponse::Ranked(results)),
        Some(job_skills) => {
            let overall_feedback = analyzer
                .summarize_pool(&jd_text, &job_skills, &results)
                .await;
            Ok(AnalysisResponse::Detailed(DetailedReport {
                results,
                job_description_skills: job_skills,
                overall_feedback,
            }))
        }
    }
}

/// Inline text passes through; a data URL is decoded and extracted by MIME type.
/// Any decoding problem yields empty text.
async fn decode_job_description(input: &str, limit: usize) -> String {
    if !extraction::is_data_url(input) {
        return input.to_string();
    }

    let payload = match extraction::decode_payload(input, limit) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Could not decode job description: {e}");
            return String::new();
        }
    };

    let header = payload.header.as_deref().unwrap_or_default();
    match DocumentFormat::from_mime_header(header) {
        Some(format) => extraction::extract_text(payload.bytes, format).await,
        None => {
            warn!("Unsupported job description type: {header}");
            String::new()
        }
    }
}

/// LLM-extracted skills, or the vocabulary skills in the JD when extraction yields none.
async fn resolve_job_skills(analyzer: &SemanticAnalyzer, jd_text: &str) -> Vec<String> {
    let extracted = analyzer.extract_job_skills(jd_text).await;
    if !extracted.is_empty() {
        return extracted;
    }
    warn!("No skills extracted from job description; using vocabulary skills");
    skills_in(jd_text).into_iter().collect()
}

async fn evaluate_resume(
    analyzer: &SemanticAnalyzer,
    upload: Value,
    jd_text: &str,
    job_skills: Option<&[String]>,
    limit: usize,
) -> Result<MatchResult, SkipReason> {
    let upload: ResumeUpload =
        serde_json::from_value(upload).map_err(|e| SkipReason::Malformed(e.to_string()))?;
    let file_name = upload
        .file_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| SkipReason::Malformed("missing fileName".to_string()))?;
    let content = upload
        .content
        .ok_or_else(|| SkipReason::Malformed(format!("{file_name}: missing content")))?;

    let format = DocumentFormat::from_file_name(&file_name)
        .ok_or_else(|| ExtractionError::UnsupportedFormat(file_name.clone()))?;
    let payload = extraction::decode_payload(&content, limit)?;
    let resume_text = extraction::extract_text(payload.bytes, format).await;
    if resume_text.trim().is_empty() {
        return Err(SkipReason::EmptyText);
    }

    let candidate_name = extract_name(&resume_text).unwrap_or_else(|| UNKNOWN.to_string());
    let candidate_email = extract_email(&resume_text).unwrap_or_else(|| UNKNOWN.to_string());

    let hard = match job_skills {
        Some(skills) => score_against_required(&resume_text, skills),
        None => score_against_vocabulary(&resume_text, jd_text),
    };
    let semantic = analyzer.analyze(&resume_text, jd_text, job_skills).await;
    let (score, verdict) = combine(hard.score, semantic.score);

    let HardMatch {
        score: hard_score,
        matched,
        missing,
    } = hard;
    let missing = match job_skills {
        Some(skills) => merge_missing(skills, &matched, missing, semantic.missing_skills),
        None => missing,
    };

    Ok(MatchResult {
        resume_name: file_name,
        candidate_name,
        candidate_email,
        score,
        verdict,
        hard_score,
        semantic_score: semantic.score,
        matched_skills_formatted: format_skills(&matched),
        matched_skills: matched,
        missing_skills_formatted: format_skills(&missing),
        missing_skills: missing,
        suggestions: semantic.suggestions,
    })
}

/// Union of deterministic and model-reported gaps, minus anything matched.
/// Model-reported gaps count only when they are among the job's skills.
fn merge_missing(
    job_skills: &[String],
    matched: &[String],
    hard: Vec<String>,
    semantic: Vec<String>,
) -> Vec<String> {
    let required: BTreeSet<String> = job_skills.iter().map(|s| s.trim().to_lowercase()).collect();
    let matched: BTreeSet<&String> = matched.iter().collect();
    hard.into_iter()
        .chain(semantic.into_iter().filter(|skill| required.contains(skill)))
        .filter(|skill| !matched.contains(skill))
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

fn format_skills(skills: &[String]) -> String {
    if skills.is_empty() {
        "None".to_string()
    } else {
        skills.join(", ")
    }
}
