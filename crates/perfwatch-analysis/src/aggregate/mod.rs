//! Folding per-pair verdicts into one run verdict.

use perfwatch_core::types::BenchmarkRecord;
use serde::Serialize;

use crate::matching::match_benchmark;
use crate::regression::{evaluate_pair, Classification, EvaluationPolicy, RegressionVerdict};

pub const NO_BASELINE_MESSAGE: &str = "No baseline results available for comparison";
pub const NO_CURRENT_MESSAGE: &str = "No current results found";

/// Overall status of a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    NoBaseline,
    Error,
    Regression,
    Pass,
}

impl RunStatus {
    /// Only a regression fails the process.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Regression => 1,
            Self::NoBaseline | Self::Error | Self::Pass => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoBaseline => "no_baseline",
            Self::Error => "error",
            Self::Regression => "regression",
            Self::Pass => "pass",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_benchmarks: usize,
    pub regressions_found: usize,
    pub improvements_found: usize,
    pub stable_benchmarks: usize,
    pub unmatched_benchmarks: usize,
}

/// Result of one baseline/current comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub threshold: f64,
    pub summary: Summary,
    pub regressions: Vec<RegressionVerdict>,
    pub improvements: Vec<RegressionVerdict>,
    pub stable: Vec<RegressionVerdict>,
}

impl AnalysisReport {
    fn empty(status: RunStatus, message: &str, threshold: f64, total_benchmarks: usize) -> Self {
        Self {
            status,
            message: Some(message.to_string()),
            threshold,
            summary: Summary {
                total_benchmarks,
                ..Default::default()
            },
            regressions: Vec::new(),
            improvements: Vec::new(),
            stable: Vec::new(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}

/// Compare with the default metrics at `threshold_pct`.
pub fn analyze(
    baseline: &[BenchmarkRecord],
    current: &[BenchmarkRecord],
    threshold_pct: f64,
) -> AnalysisReport {
    analyze_with(baseline, current, &EvaluationPolicy::new(threshold_pct))
}

/// Match every baseline record, evaluate matched pairs, and bucket them.
///
/// An empty baseline short-circuits to `no_baseline` before the current set
/// is looked at. Baselines without a counterpart are counted but not judged.
pub fn analyze_with(
    baseline: &[BenchmarkRecord],
    current: &[BenchmarkRecord],
    policy: &EvaluationPolicy,
) -> AnalysisReport {
    tracing::info!("starting regression analysis");

    if baseline.is_empty() {
        tracing::warn!("no baseline results found, skipping comparison");
        return AnalysisReport::empty(RunStatus::NoBaseline, NO_BASELINE_MESSAGE, policy.threshold_pct, 0);
    }
    if current.is_empty() {
        tracing::error!("no current results found");
        return AnalysisReport::empty(
            RunStatus::Error,
            NO_CURRENT_MESSAGE,
            policy.threshold_pct,
            baseline.len(),
        );
    }

    let mut regressions = Vec::new();
    let mut improvements = Vec::new();
    let mut stable = Vec::new();
    let mut unmatched = 0;

    for record in baseline {
        let Some(counterpart) = match_benchmark(record, current) else {
            tracing::debug!(
                model_type = record.model_type().unwrap_or("unknown"),
                "no matching current result for baseline"
            );
            unmatched += 1;
            continue;
        };

        let verdict = evaluate_pair(record, counterpart, policy);
        match verdict.classification {
            Classification::Regression => regressions.push(verdict),
            Classification::Improvement => improvements.push(verdict),
            Classification::Stable => stable.push(verdict),
        }
    }

    let status = if regressions.is_empty() {
        RunStatus::Pass
    } else {
        RunStatus::Regression
    };

    AnalysisReport {
        status,
        message: None,
        threshold: policy.threshold_pct,
        summary: Summary {
            total_benchmarks: baseline.len(),
            regressions_found: regressions.len(),
            improvements_found: improvements.len(),
            stable_benchmarks: stable.len(),
            unmatched_benchmarks: unmatched,
        },
        regressions,
        improvements,
        stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(model: &str, avg_ts: f64) -> BenchmarkRecord {
        BenchmarkRecord::new()
            .with("model_type", model)
            .with("n_threads", 8_i64)
            .with("avg_ts", avg_ts)
            .with("avg_ns", 1e6)
    }

    #[test]
    fn empty_baseline_ignores_current() {
        let report = analyze(&[], &[run("a", 1.0)], 5.0);
        assert_eq!(report.status, RunStatus::NoBaseline);
        assert_eq!(report.summary, Summary::default());
        assert_eq!(report.message.as_deref(), Some(NO_BASELINE_MESSAGE));
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn empty_current_is_error() {
        let report = analyze(&[run("a", 1.0), run("b", 1.0)], &[], 5.0);
        assert_eq!(report.status, RunStatus::Error);
        assert_eq!(report.summary.total_benchmarks, 2);
        assert_eq!(report.summary.regressions_found, 0);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn buckets_and_unmatched() {
        let baseline = vec![run("a", 100.0), run("b", 100.0), run("c", 100.0), run("d", 100.0)];
        let current = vec![run("a", 80.0), run("b", 120.0), run("c", 101.0)];
        let report = analyze(&baseline, &current, 5.0);

        assert_eq!(report.status, RunStatus::Regression);
        assert_eq!(report.exit_code(), 1);
        assert_eq!(
            report.summary,
            Summary {
                total_benchmarks: 4,
                regressions_found: 1,
                improvements_found: 1,
                stable_benchmarks: 1,
                unmatched_benchmarks: 1,
            }
        );
        assert_eq!(report.regressions[0].benchmark_key, "a");
        assert_eq!(report.improvements[0].benchmark_key, "b");
    }

    #[test]
    fn no_regression_is_pass() {
        let report = analyze(&[run("a", 100.0)], &[run("a", 100.0)], 5.0);
        assert_eq!(report.status, RunStatus::Pass);
        assert!(report.message.is_none());
        assert_eq!(report.summary.stable_benchmarks, 1);
    }

    #[test]
    fn status_serializes_snake_case() {
        let report = analyze(&[], &[], 5.0);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "no_baseline");
        assert_eq!(json["summary"]["total_benchmarks"], 0);
    }
}
