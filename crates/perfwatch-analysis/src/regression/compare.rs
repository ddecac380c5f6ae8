//! Per-metric comparison of one baseline/current pair.

use serde::Serialize;

use super::metric::{policy_for, Direction};

/// One metric compared across a matched pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    #[serde(skip)]
    pub metric: String,
    pub name: String,
    pub unit: String,
    pub direction: Direction,
    pub baseline: f64,
    pub current: f64,
    /// Signed percentage change. Zero when the baseline is zero.
    pub change_pct: f64,
    pub threshold_pct: f64,
    pub is_regression: bool,
    pub is_improvement: bool,
}

/// Compare one metric against `threshold_pct`.
///
/// A zero baseline yields a zero change and never a regression, whatever
/// the current value.
pub fn compare(metric: &str, baseline: f64, current: f64, threshold_pct: f64) -> MetricComparison {
    let policy = policy_for(metric);
    let name = if policy.name.is_empty() { metric } else { policy.name };

    let change_pct = if baseline == 0.0 {
        0.0
    } else {
        (current - baseline) / baseline * 100.0
    };
    let is_regression = policy.direction.is_regression(change_pct, threshold_pct);
    let is_improvement = !is_regression && change_pct.abs() > threshold_pct;

    MetricComparison {
        metric: metric.to_string(),
        name: name.to_string(),
        unit: policy.unit.to_string(),
        direction: policy.direction,
        baseline,
        current,
        change_pct,
        threshold_pct,
        is_regression,
        is_improvement,
    }
}
