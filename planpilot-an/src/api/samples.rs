//! Sample cases endpoint

use axum::{extract::State, routing::get, Json, Router};
use planpilot_common::SampleCase;
use tracing::debug;

use crate::AppState;

/// GET /api/sample-cases
///
/// Returns the reference study set in insertion order. Never fails; an empty
/// repository yields `[]`.
pub async fn list_sample_cases(State(state): State<AppState>) -> Json<Vec<SampleCase>> {
    debug!("Serving {} sample cases", state.samples.len());
    Json(state.samples.list().to_vec())
}

/// Build sample case routes
pub fn sample_routes() -> Router<AppState> {
    Router::new().route("/api/sample-cases", get(list_sample_cases))
}
