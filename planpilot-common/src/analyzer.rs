//! Case analyzer
//!
//! Runs the comparator over every tracked metric of one case and derives the
//! overall verdict. CI, HI and OAR score always gate `overall_non_inferior`;
//! planning time and revisions gate only when configured to.

use crate::comparator::{compare, MetricKind, MetricVerdict};
use crate::config::MarginConfig;
use crate::error::{Error, Result};
use crate::model::{
    AnalysisResult, CaseInput, CaseMetrics, QualityVerdict, RevisionVerdict, TimeVerdict,
};
use crate::validation::validate_case;
use tracing::debug;

fn quality(verdict: MetricVerdict) -> Result<QualityVerdict> {
    let non_inferior = verdict.non_inferior.ok_or_else(|| Error::InvalidMetricValue {
        metric: verdict.metric.to_string(),
        reason: "quality metric produced no verdict".to_string(),
    })?;
    Ok(QualityVerdict {
        ai_value: verdict.ai_value,
        manual_value: verdict.manual_value,
        non_inferior,
    })
}

/// Analyze one validated case
///
/// Fails with [`Error::InvalidCaseInput`] listing every offending field when
/// `input` breaks the case invariants. Either a complete result or an error is
/// returned, never a partial metrics set.
pub fn analyze(input: &CaseInput, margins: &MarginConfig) -> Result<AnalysisResult> {
    validate_case(input)?;

    let ci = compare(MetricKind::Ci, input.ai_ci, input.manual_ci, margins)?;
    let hi = compare(MetricKind::Hi, input.ai_hi, input.manual_hi, margins)?;
    let oar = compare(
        MetricKind::OarScore,
        input.ai_oar_score,
        input.manual_oar_score,
        margins,
    )?;
    let time = compare(
        MetricKind::PlanningTime,
        input.ai_minutes,
        input.manual_minutes,
        margins,
    )?;
    let revisions = compare(
        MetricKind::Revisions,
        f64::from(input.ai_revisions),
        f64::from(input.manual_revisions),
        margins,
    )?;

    // Gating verdicts only; a non-gating metric carries `None`
    let overall_non_inferior = [ci, hi, oar, time, revisions]
        .iter()
        .filter_map(|v| v.non_inferior)
        .all(|ok| ok);

    let metrics = CaseMetrics {
        ci: quality(ci)?,
        hi: quality(hi)?,
        oar_score: quality(oar)?,
        planning_time_minutes: TimeVerdict {
            ai_value: input.ai_minutes,
            manual_value: input.manual_minutes,
            saved_by_ai: time.delta,
            non_inferior: time.non_inferior,
        },
        revisions: RevisionVerdict {
            ai_value: input.ai_revisions,
            manual_value: input.manual_revisions,
            reduced_by_ai: i64::from(input.manual_revisions) - i64::from(input.ai_revisions),
            non_inferior: revisions.non_inferior,
        },
    };

    debug!(
        site = %input.site,
        overall_non_inferior,
        "Case analyzed"
    );

    Ok(AnalysisResult {
        site: input.site.clone(),
        metrics,
        overall_non_inferior,
    })
}
