//! Shared constants for the perfwatch pipeline.

// ---- Memory monitoring ----

/// A memory increase above this many KB between the first and last
/// observation is reported as a leak (1 MB).
pub const LEAK_THRESHOLD_KB: f64 = 1024.0;

/// Absolute memory usage above this many GB is reported as excessive.
pub const EXCESSIVE_MEMORY_THRESHOLD_GB: f64 = 16.0;

/// KB per MB, and per GB. Binary and decimal prefixes share these factors.
pub const KB_PER_MB: f64 = 1024.0;
pub const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Test name used for the positional leak check over benchmark output.
pub const BENCHMARK_TEST_NAME: &str = "benchmark";

/// Default commit recorded when none is supplied.
pub const DEFAULT_BUILD_COMMIT: &str = "unknown";

/// `memory_leak_logs.status_code` for leak rows.
pub const LEAK_ROW_STATUS_CODE: i64 = -1;

/// `memory_leak_logs.status_code` for excessive-usage rows.
pub const EXCESSIVE_ROW_STATUS_CODE: i64 = -2;

// ---- Regression detection ----

/// Default regression threshold, in percent.
pub const DEFAULT_REGRESSION_THRESHOLD_PCT: f64 = 5.0;

/// Metrics evaluated for regression when none are configured.
pub const DEFAULT_EVALUATED_METRICS: [&str; 2] = ["avg_ts", "avg_ns"];

/// Marker file written when a regression is detected, for CI gating.
pub const DEFAULT_SENTINEL_PATH: &str = "regression-detected.flag";

/// Benchmark results table in the llama-bench database.
pub const BENCHMARK_TABLE: &str = "test";

// ---- Reports ----

/// Default markdown report path for the leak monitor.
pub const DEFAULT_MEMORY_REPORT_PATH: &str = "memory-report.md";

/// Default markdown report path for the regression detector.
pub const DEFAULT_REGRESSION_REPORT_PATH: &str = "regression-report.md";

/// Project config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "perfwatch.toml";
