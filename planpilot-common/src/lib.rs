//! # PlanPilot Common Library
//!
//! Shared code for the PlanPilot-VMAT services:
//! - Case and verdict models
//! - Input validation
//! - Non-inferiority comparison and case analysis
//! - Reference sample cases
//! - Configuration loading

pub mod analyzer;
pub mod comparator;
pub mod config;
pub mod error;
pub mod model;
pub mod samples;
pub mod validation;

pub use analyzer::analyze;
pub use comparator::{compare, MetricKind, MetricVerdict};
pub use config::MarginConfig;
pub use error::{Error, FieldError, Result};
pub use model::{AnalysisResult, CaseInput, CaseSubmission, SampleCase};
pub use samples::SampleRepository;
