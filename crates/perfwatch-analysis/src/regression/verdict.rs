//! Evaluating a matched pair into a single verdict.

use perfwatch_core::config::RegressionConfig;
use perfwatch_core::constants::{DEFAULT_EVALUATED_METRICS, DEFAULT_REGRESSION_THRESHOLD_PCT};
use perfwatch_core::types::{BenchmarkRecord, FieldValue, KeyProperty};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::compare::{compare, MetricComparison};
use super::metric::Metric;

/// Overall classification of a matched pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Regression,
    Improvement,
    Stable,
}

/// Which metrics to evaluate and at what threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationPolicy {
    /// Global threshold, shown in reports.
    pub threshold_pct: f64,
    /// `(metric column, threshold)` in evaluation order.
    pub metrics: Vec<(String, f64)>,
}

impl EvaluationPolicy {
    /// The default metrics, all at `threshold_pct`.
    pub fn new(threshold_pct: f64) -> Self {
        Self {
            threshold_pct,
            metrics: DEFAULT_EVALUATED_METRICS
                .iter()
                .map(|m| (m.to_string(), threshold_pct))
                .collect(),
        }
    }

    /// Build from config. Unknown names are kept and evaluated with the
    /// default policy; they are only logged.
    pub fn from_config(config: &RegressionConfig) -> Self {
        let metrics: Vec<(String, f64)> = config
            .effective_metrics()
            .into_iter()
            .map(|m| {
                if Metric::from_column(&m).is_none() {
                    tracing::warn!(metric = %m, "unknown metric, using default policy");
                }
                let threshold = config.threshold_for(&m);
                (m, threshold)
            })
            .collect();

        for key in config.metric_thresholds.keys() {
            if !metrics.iter().any(|(m, _)| m == key) {
                tracing::warn!(metric = %key, "threshold override for a metric that is not evaluated");
            }
        }

        Self {
            threshold_pct: config.effective_threshold_pct(),
            metrics,
        }
    }
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REGRESSION_THRESHOLD_PCT)
    }
}

/// One matched pair and its per-metric comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionVerdict {
    pub benchmark_key: String,
    pub baseline: BenchmarkRecord,
    pub current: BenchmarkRecord,
    /// In evaluation order.
    pub changes: Vec<MetricComparison>,
    pub classification: Classification,
}

impl RegressionVerdict {
    pub fn change(&self, metric: &str) -> Option<&MetricComparison> {
        self.changes.iter().find(|c| c.metric == metric)
    }
}

struct ChangeMap<'a>(&'a [MetricComparison]);

impl Serialize for ChangeMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for change in self.0 {
            map.serialize_entry(&change.metric, change)?;
        }
        map.end()
    }
}

impl Serialize for RegressionVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("benchmark_key", &self.benchmark_key)?;
        map.serialize_entry("classification", &self.classification)?;
        map.serialize_entry("baseline", &self.baseline)?;
        map.serialize_entry("current", &self.current)?;
        map.serialize_entry("changes", &ChangeMap(&self.changes))?;
        map.end()
    }
}

/// Human-readable key: model, backend, GPU layers (if nonzero), prompt and
/// generation lengths, joined with `" | "`. Absent or null fields are
/// omitted; with nothing left the key is `"unknown"`.
pub fn benchmark_key(record: &BenchmarkRecord) -> String {
    let present = move |key| record.key_property(key).filter(|v: &&FieldValue| !v.is_null());

    let mut parts = Vec::new();
    if let Some(model) = present(KeyProperty::ModelType) {
        parts.push(model.to_string());
    }
    if let Some(backend) = present(KeyProperty::Backends) {
        parts.push(format!("backend:{backend}"));
    }
    if let Some(ngl) = present(KeyProperty::NGpuLayers).filter(|v| v.is_truthy()) {
        parts.push(format!("ngl:{ngl}"));
    }
    if let Some(n_prompt) = present(KeyProperty::NPrompt) {
        parts.push(format!("p:{n_prompt}"));
    }
    if let Some(n_gen) = present(KeyProperty::NGen) {
        parts.push(format!("g:{n_gen}"));
    }

    if parts.is_empty() {
        "unknown".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Compare every policy metric present and non-null on both sides.
pub fn evaluate_pair(
    baseline: &BenchmarkRecord,
    current: &BenchmarkRecord,
    policy: &EvaluationPolicy,
) -> RegressionVerdict {
    let changes: Vec<MetricComparison> = policy
        .metrics
        .iter()
        .filter_map(|(metric, threshold)| {
            let b = baseline.metric(metric)?;
            let c = current.metric(metric)?;
            Some(compare(metric, b, c, *threshold))
        })
        .collect();

    let classification = if changes.iter().any(|c| c.is_regression) {
        Classification::Regression
    } else if changes.iter().any(|c| c.is_improvement) {
        Classification::Improvement
    } else {
        Classification::Stable
    };

    RegressionVerdict {
        benchmark_key: benchmark_key(baseline),
        baseline: baseline.clone(),
        current: current.clone(),
        changes,
        classification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(avg_ts: f64, avg_ns: f64) -> BenchmarkRecord {
        BenchmarkRecord::new()
            .with("model_type", "llama-7b")
            .with("backends", "cpu")
            .with("n_gpu_layers", 0_i64)
            .with("n_prompt", 128_i64)
            .with("n_gen", 128_i64)
            .with("avg_ts", avg_ts)
            .with("avg_ns", avg_ns)
    }

    #[test]
    fn key_skips_zero_gpu_layers() {
        assert_eq!(benchmark_key(&run(1.0, 1.0)), "llama-7b | backend:cpu | p:128 | g:128");
        let with_gpu = run(1.0, 1.0).with("n_gpu_layers", 99_i64);
        assert_eq!(benchmark_key(&with_gpu), "llama-7b | backend:cpu | ngl:99 | p:128 | g:128");
    }

    #[test]
    fn key_omits_missing_fields() {
        let record = BenchmarkRecord::new()
            .with("model_type", "m")
            .with("backends", FieldValue::Null)
            .with("n_gen", 32_i64);
        assert_eq!(benchmark_key(&record), "m | g:32");
        assert_eq!(benchmark_key(&BenchmarkRecord::new()), "unknown");
    }

    #[test]
    fn regression_takes_precedence() {
        // Throughput improves while latency regresses.
        let verdict = evaluate_pair(&run(100.0, 1000.0), &run(120.0, 1200.0), &EvaluationPolicy::new(5.0));
        assert_eq!(verdict.classification, Classification::Regression);
        assert!(verdict.change("avg_ts").unwrap().is_improvement);
        assert!(verdict.change("avg_ns").unwrap().is_regression);
    }

    #[test]
    fn improvement_and_stable() {
        let policy = EvaluationPolicy::new(5.0);
        let improved = evaluate_pair(&run(100.0, 1000.0), &run(110.0, 1000.0), &policy);
        assert_eq!(improved.classification, Classification::Improvement);

        let stable = evaluate_pair(&run(100.0, 1000.0), &run(101.0, 1010.0), &policy);
        assert_eq!(stable.classification, Classification::Stable);
    }

    #[test]
    fn null_metric_is_skipped() {
        let baseline = run(100.0, 1000.0).with("avg_ns", FieldValue::Null);
        let verdict = evaluate_pair(&baseline, &run(100.0, 5000.0), &EvaluationPolicy::new(5.0));
        assert!(verdict.change("avg_ns").is_none());
        assert_eq!(verdict.changes.len(), 1);
        assert_eq!(verdict.classification, Classification::Stable);
    }

    #[test]
    fn policy_from_config_uses_overrides() {
        let mut config = RegressionConfig {
            threshold_pct: Some(10.0),
            metrics: vec!["avg_ts".into(), "model_size".into()],
            ..Default::default()
        };
        config.metric_thresholds.insert("model_size".into(), 1.0);
        let policy = EvaluationPolicy::from_config(&config);
        assert_eq!(policy.threshold_pct, 10.0);
        assert_eq!(
            policy.metrics,
            vec![("avg_ts".to_string(), 10.0), ("model_size".to_string(), 1.0)]
        );
    }

    #[test]
    fn changes_serialize_keyed_by_metric() {
        let verdict = evaluate_pair(&run(50.0, 2e7), &run(40.0, 2e7), &EvaluationPolicy::new(5.0));
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["classification"], "regression");
        assert_eq!(json["changes"]["avg_ts"]["is_regression"], true);
        assert_eq!(json["changes"]["avg_ts"]["name"], "Average Tokens/Second");
        assert_eq!(json["baseline"]["model_type"], "llama-7b");
    }
}
