//! Metric comparator
//!
//! Compares one AI/manual metric pair against the configured margin.
//!
//! # Non-inferiority rules
//! - Higher is better (CI): `ai >= manual - tolerance`
//! - Lower is better (HI, OAR, and gated time/revisions): `ai <= manual + tolerance`
//!
//! Tolerance comes from [`MarginPolicy::tolerance`]. Efficiency metrics that
//! are not configured as gating get no verdict, only the `manual - ai` delta.
//!
//! [`MarginPolicy::tolerance`]: crate::config::MarginPolicy::tolerance

use crate::config::MarginConfig;
use crate::error::{Error, Result};
use serde::Serialize;

/// Which way a metric improves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Tracked plan metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetricKind {
    /// Conformity index
    #[serde(rename = "ci")]
    Ci,
    /// Homogeneity index
    #[serde(rename = "hi")]
    Hi,
    /// Organ-at-risk composite score
    #[serde(rename = "oarScore")]
    OarScore,
    #[serde(rename = "planningTimeMinutes")]
    PlanningTime,
    #[serde(rename = "revisions")]
    Revisions,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Ci,
        MetricKind::Hi,
        MetricKind::OarScore,
        MetricKind::PlanningTime,
        MetricKind::Revisions,
    ];

    pub fn direction(self) -> Direction {
        match self {
            MetricKind::Ci => Direction::HigherIsBetter,
            MetricKind::Hi
            | MetricKind::OarScore
            | MetricKind::PlanningTime
            | MetricKind::Revisions => Direction::LowerIsBetter,
        }
    }

    /// Time and revisions are secondary efficiency endpoints
    pub fn is_efficiency(self) -> bool {
        matches!(self, MetricKind::PlanningTime | MetricKind::Revisions)
    }

    /// Key used in the `metrics` object of an analysis result
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Ci => "ci",
            MetricKind::Hi => "hi",
            MetricKind::OarScore => "oarScore",
            MetricKind::PlanningTime => "planningTimeMinutes",
            MetricKind::Revisions => "revisions",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing one metric pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricVerdict {
    pub metric: MetricKind,
    pub ai_value: f64,
    pub manual_value: f64,
    /// `None` when the metric does not gate (efficiency metrics by default)
    pub non_inferior: Option<bool>,
    /// `manual_value - ai_value`; positive means AI was faster/fewer
    pub delta: f64,
}

fn check_value(metric: MetricKind, side: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidMetricValue {
            metric: metric.to_string(),
            reason: format!("{side} value is not finite"),
        });
    }
    if value < 0.0 {
        return Err(Error::InvalidMetricValue {
            metric: metric.to_string(),
            reason: format!("{side} value {value} is negative"),
        });
    }
    Ok(())
}

/// Compare an AI value against a manual value for `metric`
///
/// Pure function. Fails with [`Error::InvalidMetricValue`] on a negative or
/// non-finite value.
pub fn compare(
    metric: MetricKind,
    ai_value: f64,
    manual_value: f64,
    margins: &MarginConfig,
) -> Result<MetricVerdict> {
    check_value(metric, "AI", ai_value)?;
    check_value(metric, "manual", manual_value)?;

    let policy = margins.policy(metric);
    let non_inferior = policy.gating.then(|| {
        let tolerance = policy.margin.tolerance(manual_value);
        match metric.direction() {
            Direction::HigherIsBetter => ai_value >= manual_value - tolerance,
            Direction::LowerIsBetter => ai_value <= manual_value + tolerance,
        }
    });

    Ok(MetricVerdict {
        metric,
        ai_value,
        manual_value,
        non_inferior,
        delta: manual_value - ai_value,
    })
}
