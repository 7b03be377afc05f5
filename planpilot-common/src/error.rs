//! Common error types for PlanPilot

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Common result type for PlanPilot operations
pub type Result<T> = std::result::Result<T, Error>;

/// One offending field in a rejected case submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the field (e.g. `ai_minutes`)
    pub field: String,
    /// Human-readable reason
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Common error types across PlanPilot crates
#[derive(Error, Debug)]
pub enum Error {
    /// Case submission failed validation; carries every offending field
    #[error("Invalid case input: {}", join_fields(.0))]
    InvalidCaseInput(Vec<FieldError>),

    /// A single metric value reached the comparator out of range.
    /// Validation should make this unreachable from the service boundary.
    #[error("Invalid metric value for {metric}: {reason}")]
    InvalidMetricValue { metric: String, reason: String },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_case_input_lists_every_field() {
        let err = Error::InvalidCaseInput(vec![
            FieldError::new("site", "must not be empty"),
            FieldError::new("ai_minutes", "must be non-negative"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("site must not be empty"));
        assert!(msg.contains("ai_minutes must be non-negative"));
    }
}
