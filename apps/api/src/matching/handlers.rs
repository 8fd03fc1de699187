//! Axum route handler for the Analysis API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::pipeline::{analyze, AnalysisResponse, AnalyzeRequest, PipelineOptions};
use crate::state::AppState;

/// POST /api/analyze
///
/// Scores each submitted resume against the job description. Returns a bare
/// result array in vocabulary mode, or `{results, jobDescriptionSkills,
/// overallFeedback}` in extracted-skills mode.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let Json(request) = payload?;

    let mode = request.mode.unwrap_or(state.config.scoring_mode);
    let options = PipelineOptions {
        mode,
        max_document_bytes: state.config.max_upload_bytes(),
    };

    let request_id = Uuid::new_v4();
    let response = analyze(&state.analyzer, options, request)
        .instrument(info_span!("analyze", %request_id, ?mode))
        .await?;

    Ok(Json(response))
}
