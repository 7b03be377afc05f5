//! Case input validation
//!
//! Every check appends to a shared list instead of returning early, so a
//! rejected submission reports all offending fields at once.

use crate::error::{Error, FieldError, Result};
use crate::model::{CaseInput, CaseSubmission};

/// Check a measured value: finite and non-negative
pub(crate) fn check_measure(field: &str, value: f64, errors: &mut Vec<FieldError>) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, "must be a finite number"));
    } else if value < 0.0 {
        errors.push(FieldError::new(field, "must be non-negative"));
    }
}

fn check_site(site: &str, errors: &mut Vec<FieldError>) {
    if site.trim().is_empty() {
        errors.push(FieldError::new("site", "must not be empty"));
    }
}

/// Validate an already-typed case
///
/// Revision counts are unsigned in [`CaseInput`], so only the site and the
/// real-valued fields need checking here.
pub fn validate_case(input: &CaseInput) -> Result<()> {
    let mut errors = Vec::new();

    check_site(&input.site, &mut errors);
    for (field, value) in [
        ("ai_ci", input.ai_ci),
        ("manual_ci", input.manual_ci),
        ("ai_hi", input.ai_hi),
        ("manual_hi", input.manual_hi),
        ("ai_oar_score", input.ai_oar_score),
        ("manual_oar_score", input.manual_oar_score),
        ("ai_minutes", input.ai_minutes),
        ("manual_minutes", input.manual_minutes),
    ] {
        check_measure(field, value, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidCaseInput(errors))
    }
}

fn require_measure(field: &str, value: Option<f64>, errors: &mut Vec<FieldError>) -> f64 {
    match value {
        Some(v) => {
            check_measure(field, v, errors);
            v
        }
        None => {
            errors.push(FieldError::new(field, "is required"));
            0.0
        }
    }
}

fn require_count(field: &str, value: Option<f64>, errors: &mut Vec<FieldError>) -> u32 {
    let Some(v) = value else {
        errors.push(FieldError::new(field, "is required"));
        return 0;
    };

    let before = errors.len();
    check_measure(field, v, errors);
    if errors.len() > before {
        return 0;
    }
    if v.fract() != 0.0 {
        errors.push(FieldError::new(field, "must be a whole number"));
        return 0;
    }
    if v > f64::from(u32::MAX) {
        errors.push(FieldError::new(field, "is out of range"));
        return 0;
    }
    v as u32
}

impl CaseSubmission {
    /// Convert a raw submission into a validated [`CaseInput`]
    ///
    /// Fails with [`Error::InvalidCaseInput`] listing every missing, negative,
    /// non-finite or non-integral field, plus an empty site.
    pub fn into_case_input(self) -> Result<CaseInput> {
        let mut errors = Vec::new();

        let site = match self.site {
            Some(site) => {
                check_site(&site, &mut errors);
                site
            }
            None => {
                errors.push(FieldError::new("site", "is required"));
                String::new()
            }
        };

        let input = CaseInput {
            site,
            ai_ci: require_measure("ai_ci", self.ai_ci, &mut errors),
            manual_ci: require_measure("manual_ci", self.manual_ci, &mut errors),
            ai_hi: require_measure("ai_hi", self.ai_hi, &mut errors),
            manual_hi: require_measure("manual_hi", self.manual_hi, &mut errors),
            ai_oar_score: require_measure("ai_oar_score", self.ai_oar_score, &mut errors),
            manual_oar_score: require_measure(
                "manual_oar_score",
                self.manual_oar_score,
                &mut errors,
            ),
            ai_minutes: require_measure("ai_minutes", self.ai_minutes, &mut errors),
            manual_minutes: require_measure("manual_minutes", self.manual_minutes, &mut errors),
            ai_revisions: require_count("ai_revisions", self.ai_revisions, &mut errors),
            manual_revisions: require_count("manual_revisions", self.manual_revisions, &mut errors),
        };

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(Error::InvalidCaseInput(errors))
        }
    }
}
