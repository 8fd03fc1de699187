mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::matching::semantic::SemanticAnalyzer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values only)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Matcher v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Scoring mode: {:?}, upload limit: {} MB",
        config.scoring_mode, config.max_upload_mb
    );

    // Initialize LLM client (optional; semantic scores are 0 without it)
    let analyzer = SemanticAnalyzer::new(build_text_generator(&config));
    info!(
        "Semantic scoring {}",
        if analyzer.is_available() { "enabled" } else { "disabled" }
    );

    let state = AppState {
        config: config.clone(),
        analyzer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the LLM client once at startup. A missing key or a client that
/// cannot be built disables semantic scoring instead of aborting.
fn build_text_generator(config: &Config) -> Option<Arc<dyn TextGenerator>> {
    let Some(api_key) = config.anthropic_api_key.clone() else {
        warn!("ANTHROPIC_API_KEY not configured; semantic scoring disabled");
        return None;
    };

    match LlmClient::new(api_key, config.llm_model.clone()) {
        Ok(client) => {
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("Failed to initialize LLM client: {e}; semantic scoring disabled");
            None
        }
    }
}
