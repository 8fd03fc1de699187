use crate::config::Config;
use crate::matching::semantic::SemanticAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Wraps the optional LLM client; without one, semantic scores are 0.
    pub analyzer: SemanticAnalyzer,
}
