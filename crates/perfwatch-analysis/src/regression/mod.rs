//! Regression evaluation over matched baseline/current pairs.

pub mod compare;
pub mod metric;
pub mod verdict;

pub use compare::{compare, MetricComparison};
pub use metric::{policy_for, Direction, Metric, MetricPolicy};
pub use verdict::{benchmark_key, evaluate_pair, Classification, EvaluationPolicy, RegressionVerdict};
