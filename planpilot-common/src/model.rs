//! Case and verdict models
//!
//! Wire shapes for the analysis API:
//! - [`CaseSubmission`]: raw request body, every field optional so that
//!   missing fields can be reported together with invalid ones
//! - [`CaseInput`]: validated, typed case
//! - [`AnalysisResult`]: per-metric verdicts plus the overall verdict

use serde::{Deserialize, Serialize};

// ========================================
// Request Types
// ========================================

/// Raw `POST /api/analyze` body
///
/// Unknown fields are rejected at deserialization. Missing or null fields
/// deserialize to `None` and are reported by [`CaseSubmission::into_case_input`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseSubmission {
    pub site: Option<String>,
    pub ai_ci: Option<f64>,
    pub manual_ci: Option<f64>,
    pub ai_hi: Option<f64>,
    pub manual_hi: Option<f64>,
    pub ai_oar_score: Option<f64>,
    pub manual_oar_score: Option<f64>,
    pub ai_minutes: Option<f64>,
    pub manual_minutes: Option<f64>,
    pub ai_revisions: Option<f64>,
    pub manual_revisions: Option<f64>,
}

/// One validated AI-vs-manual planning comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    /// Treatment site label (e.g. "Head & Neck")
    pub site: String,
    /// Conformity index, higher is better
    pub ai_ci: f64,
    pub manual_ci: f64,
    /// Homogeneity index, lower is better
    pub ai_hi: f64,
    pub manual_hi: f64,
    /// Organ-at-risk composite score, lower is better
    pub ai_oar_score: f64,
    pub manual_oar_score: f64,
    /// Planning duration in minutes
    pub ai_minutes: f64,
    pub manual_minutes: f64,
    /// Number of plan revisions
    pub ai_revisions: u32,
    pub manual_revisions: u32,
}

// ========================================
// Response Types
// ========================================

/// Verdict for a plan-quality metric (CI, HI, OAR score)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityVerdict {
    pub ai_value: f64,
    pub manual_value: f64,
    pub non_inferior: bool,
}

/// Verdict for planning time
///
/// `non_inferior` is present only when planning time is configured as gating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeVerdict {
    pub ai_value: f64,
    pub manual_value: f64,
    #[serde(rename = "savedByAI")]
    pub saved_by_ai: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_inferior: Option<bool>,
}

/// Verdict for revision count
///
/// `reduced_by_ai` is signed: negative when AI needed more revisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionVerdict {
    pub ai_value: u32,
    pub manual_value: u32,
    #[serde(rename = "reducedByAI")]
    pub reduced_by_ai: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_inferior: Option<bool>,
}

/// Fixed set of tracked metrics for one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseMetrics {
    pub ci: QualityVerdict,
    pub hi: QualityVerdict,
    pub oar_score: QualityVerdict,
    pub planning_time_minutes: TimeVerdict,
    pub revisions: RevisionVerdict,
}

/// Full outcome of analyzing one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub site: String,
    pub metrics: CaseMetrics,
    pub overall_non_inferior: bool,
}

/// Reference study case; same shape as a live analysis
pub type SampleCase = AnalysisResult;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_rejects_unknown_fields() {
        let body = json!({ "site": "Pelvis", "ai_dose": 1.0 });
        let parsed: Result<CaseSubmission, _> = serde_json::from_value(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_submission_missing_fields_are_none() {
        let parsed: CaseSubmission = serde_json::from_value(json!({ "site": "Pelvis" })).unwrap();
        assert_eq!(parsed.site.as_deref(), Some("Pelvis"));
        assert!(parsed.ai_ci.is_none());
        assert!(parsed.manual_revisions.is_none());
    }

    #[test]
    fn test_time_verdict_omits_gate_when_not_configured() {
        let verdict = TimeVerdict {
            ai_value: 45.0,
            manual_value: 95.0,
            saved_by_ai: 50.0,
            non_inferior: None,
        };
        let value = serde_json::to_value(verdict).unwrap();
        assert_eq!(value["savedByAI"], 50.0);
        assert!(value.get("nonInferior").is_none());
    }

    #[test]
    fn test_revision_verdict_wire_names() {
        let verdict = RevisionVerdict {
            ai_value: 1,
            manual_value: 3,
            reduced_by_ai: 2,
            non_inferior: Some(true),
        };
        let value = serde_json::to_value(verdict).unwrap();
        assert_eq!(value["aiValue"], 1);
        assert_eq!(value["manualValue"], 3);
        assert_eq!(value["reducedByAI"], 2);
        assert_eq!(value["nonInferior"], true);
    }
}
