//! planpilot-an library - Non-inferiority analysis service
//!
//! Stateless HTTP front for the case analyzer. The only shared data is the
//! margin configuration and the sample repository, both fixed at startup.

pub mod api;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use planpilot_common::{MarginConfig, SampleRepository};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active non-inferiority margins
    pub margins: MarginConfig,
    /// Reference study cases, analyzed once at startup
    pub samples: SampleRepository,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(margins: MarginConfig, samples: SampleRepository) -> Self {
        Self {
            margins,
            samples,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// All routes are public. CORS is permissive so a browser frontend served
/// from another origin can call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::analysis_routes())
        .merge(api::sample_routes())
        .merge(api::margin_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
