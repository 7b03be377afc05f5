//! Active margin policy endpoint
//!
//! Lets clients and auditors see the thresholds behind every verdict.

use axum::{extract::State, routing::get, Json, Router};
use planpilot_common::config::MetricPolicy;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MarginsResponse {
    pub margins: Vec<MetricPolicy>,
}

/// GET /api/margins
pub async fn get_margins(State(state): State<AppState>) -> Json<MarginsResponse> {
    Json(MarginsResponse {
        margins: state.margins.entries(),
    })
}

/// Build margin policy routes
pub fn margin_routes() -> Router<AppState> {
    Router::new().route("/api/margins", get(get_margins))
}
