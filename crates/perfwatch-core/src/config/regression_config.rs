//! Regression detector configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EVALUATED_METRICS, DEFAULT_REGRESSION_THRESHOLD_PCT, DEFAULT_SENTINEL_PATH,
};

/// Configuration for baseline/current comparison.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegressionConfig {
    /// Percentage change that counts as a regression. Default: 5.0.
    pub threshold_pct: Option<f64>,
    /// Metrics to classify. Default: `["avg_ts", "avg_ns"]`.
    #[serde(default)]
    pub metrics: Vec<String>,
    /// Per-metric threshold overrides, keyed by metric column name.
    #[serde(default)]
    pub metric_thresholds: BTreeMap<String, f64>,
    /// Marker file written on regression. Default: `regression-detected.flag`.
    pub sentinel_path: Option<String>,
}

impl RegressionConfig {
    pub fn effective_threshold_pct(&self) -> f64 {
        self.threshold_pct.unwrap_or(DEFAULT_REGRESSION_THRESHOLD_PCT)
    }

    /// Metrics to evaluate, in configured order.
    pub fn effective_metrics(&self) -> Vec<String> {
        if self.metrics.is_empty() {
            DEFAULT_EVALUATED_METRICS.iter().map(|m| m.to_string()).collect()
        } else {
            self.metrics.clone()
        }
    }

    /// Threshold for one metric: its override, else the global threshold.
    pub fn threshold_for(&self, metric: &str) -> f64 {
        self.metric_thresholds
            .get(metric)
            .copied()
            .unwrap_or_else(|| self.effective_threshold_pct())
    }

    pub fn effective_sentinel_path(&self) -> &str {
        self.sentinel_path.as_deref().unwrap_or(DEFAULT_SENTINEL_PATH)
    }
}
