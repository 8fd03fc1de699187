use anyhow::{anyhow, Context, Result};

use crate::matching::pipeline::ScoringMode;

/// Default model for semantic analysis when `LLM_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Room for the job description and JSON framing around an encoded document.
const REQUEST_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; a missing API key just disables semantic scoring.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub scoring_mode: ScoringMode,
    pub max_upload_mb: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            scoring_mode: match optional_env("SCORING_MODE") {
                Some(raw) => raw.parse::<ScoringMode>().map_err(|e| {
                    anyhow!("SCORING_MODE must be 'vocabulary' or 'extracted_skills': {e}")
                })?,
                None => ScoringMode::default(),
            },
            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .unwrap_or_else(|_| "200".to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a positive integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Size limit for a single decoded document.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Request body limit: one maximum-size document after base64 encoding,
    /// plus overhead.
    pub fn max_request_bytes(&self) -> usize {
        self.max_upload_bytes()
            .div_ceil(3)
            .saturating_mul(4)
            .saturating_add(REQUEST_OVERHEAD_BYTES)
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            llm_model: DEFAULT_MODEL.to_string(),
            scoring_mode: ScoringMode::default(),
            max_upload_mb: 200,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Treats unset and blank variables the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
