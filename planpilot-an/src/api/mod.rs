//! HTTP API handlers for planpilot-an

pub mod analyze;
pub mod health;
pub mod margins;
pub mod samples;

pub use analyze::{analysis_routes, analyze_case};
pub use health::{health_check, health_routes};
pub use margins::{get_margins, margin_routes};
pub use samples::{list_sample_cases, sample_routes};
