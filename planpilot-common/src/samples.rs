//! Reference sample cases
//!
//! A curated multi-site study set, analyzed once at startup and shared
//! read-only for the lifetime of the process. Listing order is the
//! insertion order of the study set.

use crate::analyzer::analyze;
use crate::config::MarginConfig;
use crate::error::Result;
use crate::model::{CaseInput, SampleCase};
use std::sync::Arc;

/// Build a reference case from (ci, hi, oar, minutes) pairs and revision counts
fn reference_case(
    site: &str,
    (ai_ci, manual_ci): (f64, f64),
    (ai_hi, manual_hi): (f64, f64),
    (ai_oar_score, manual_oar_score): (f64, f64),
    (ai_minutes, manual_minutes): (f64, f64),
    (ai_revisions, manual_revisions): (u32, u32),
) -> CaseInput {
    CaseInput {
        site: site.to_string(),
        ai_ci,
        manual_ci,
        ai_hi,
        manual_hi,
        ai_oar_score,
        manual_oar_score,
        ai_minutes,
        manual_minutes,
        ai_revisions,
        manual_revisions,
    }
}

/// The study's reference inputs, in presentation order
pub fn reference_inputs() -> Vec<CaseInput> {
    vec![
        reference_case("Head & Neck", (0.92, 0.91), (1.07, 1.05), (23.0, 24.0), (45.0, 95.0), (1, 3)),
        reference_case("Prostat", (0.94, 0.93), (1.04, 1.03), (18.0, 18.0), (35.0, 70.0), (1, 2)),
        reference_case("Pelvis", (0.9, 0.9), (1.08, 1.08), (26.0, 25.0), (50.0, 80.0), (2, 3)),
        reference_case("Toraks", (0.88, 0.9), (1.1, 1.06), (28.0, 27.0), (55.0, 90.0), (2, 4)),
    ]
}

/// Immutable, cheaply clonable collection of sample cases
#[derive(Debug, Clone)]
pub struct SampleRepository {
    cases: Arc<[SampleCase]>,
}

impl SampleRepository {
    /// Wrap already-analyzed cases, preserving their order
    pub fn from_cases(cases: Vec<SampleCase>) -> Self {
        Self {
            cases: cases.into(),
        }
    }

    /// Analyze the reference study set under `margins`
    ///
    /// Running the reference inputs through the analyzer guarantees every
    /// entry satisfies the same invariants as a live analysis.
    pub fn reference(margins: &MarginConfig) -> Result<Self> {
        let cases = reference_inputs()
            .iter()
            .map(|input| analyze(input, margins))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_cases(cases))
    }

    pub fn empty() -> Self {
        Self::from_cases(Vec::new())
    }

    /// All sample cases in insertion order
    pub fn list(&self) -> &[SampleCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
