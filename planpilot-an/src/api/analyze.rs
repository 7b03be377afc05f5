//! Case analysis endpoint
//!
//! POST /api/analyze takes a case submission, validates it and returns the
//! full analysis result. Validation failures list every offending field.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use planpilot_common::{analyze, AnalysisResult, CaseSubmission};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/analyze
pub async fn analyze_case(
    State(state): State<AppState>,
    payload: Result<Json<CaseSubmission>, JsonRejection>,
) -> ApiResult<Json<AnalysisResult>> {
    let Json(submission) = payload.map_err(|rejection| {
        warn!("Rejected analyze body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    let input = submission.into_case_input().map_err(|e| {
        warn!("Case submission failed validation: {}", e);
        ApiError::from(e)
    })?;

    let result = analyze(&input, &state.margins)?;

    info!(
        site = %result.site,
        ci = result.metrics.ci.non_inferior,
        hi = result.metrics.hi.non_inferior,
        oar_score = result.metrics.oar_score.non_inferior,
        saved_minutes = result.metrics.planning_time_minutes.saved_by_ai,
        overall = result.overall_non_inferior,
        "Case analyzed"
    );

    Ok(Json(result))
}

/// Build analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze_case))
}
