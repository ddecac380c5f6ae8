//! Metric catalogue: direction, display name, unit, and print precision.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which way a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    /// True when a signed percentage change crosses `threshold_pct` the wrong way.
    pub fn is_regression(&self, change_pct: f64, threshold_pct: f64) -> bool {
        match self {
            Self::HigherIsBetter => change_pct < -threshold_pct,
            Self::LowerIsBetter => change_pct > threshold_pct,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HigherIsBetter => f.write_str("higher_is_better"),
            Self::LowerIsBetter => f.write_str("lower_is_better"),
        }
    }
}

/// Metrics with a known policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    AvgTs,
    AvgNs,
    ModelSize,
}

impl Metric {
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "avg_ts" => Some(Self::AvgTs),
            "avg_ns" => Some(Self::AvgNs),
            "model_size" => Some(Self::ModelSize),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::AvgTs => "avg_ts",
            Self::AvgNs => "avg_ns",
            Self::ModelSize => "model_size",
        }
    }

    pub fn policy(&self) -> MetricPolicy {
        match self {
            Self::AvgTs => MetricPolicy {
                name: "Average Tokens/Second",
                unit: "tokens/s",
                direction: Direction::HigherIsBetter,
                precision: 2,
            },
            Self::AvgNs => MetricPolicy {
                name: "Average Latency",
                unit: "ns",
                direction: Direction::LowerIsBetter,
                precision: 0,
            },
            Self::ModelSize => MetricPolicy {
                name: "Model Size",
                unit: "bytes",
                direction: Direction::LowerIsBetter,
                precision: 0,
            },
        }
    }
}

/// How a metric is judged and printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricPolicy {
    pub name: &'static str,
    pub unit: &'static str,
    pub direction: Direction,
    /// Decimal places used when printing raw values.
    pub precision: usize,
}

/// Policy for metrics outside the catalogue. The display name falls back to
/// the column name at the call site.
pub const DEFAULT_POLICY: MetricPolicy = MetricPolicy {
    name: "",
    unit: "",
    direction: Direction::HigherIsBetter,
    precision: 2,
};

/// Catalogue lookup with an explicit default for unknown columns.
pub fn policy_for(column: &str) -> MetricPolicy {
    Metric::from_column(column).map_or(DEFAULT_POLICY, |m| m.policy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_directions() {
        assert_eq!(policy_for("avg_ts").direction, Direction::HigherIsBetter);
        assert_eq!(policy_for("avg_ns").direction, Direction::LowerIsBetter);
        assert_eq!(policy_for("model_size").direction, Direction::LowerIsBetter);
    }

    #[test]
    fn unknown_column_gets_default_policy() {
        assert_eq!(policy_for("stddev_ts"), DEFAULT_POLICY);
        assert!(Metric::from_column("stddev_ts").is_none());
    }

    #[test]
    fn column_round_trips() {
        for metric in [Metric::AvgTs, Metric::AvgNs, Metric::ModelSize] {
            assert_eq!(Metric::from_column(metric.column()), Some(metric));
        }
    }

    #[test]
    fn regression_predicate_is_strict() {
        assert!(!Direction::HigherIsBetter.is_regression(-5.0, 5.0));
        assert!(Direction::HigherIsBetter.is_regression(-5.01, 5.0));
        assert!(!Direction::LowerIsBetter.is_regression(5.0, 5.0));
        assert!(Direction::LowerIsBetter.is_regression(5.01, 5.0));
    }
}
