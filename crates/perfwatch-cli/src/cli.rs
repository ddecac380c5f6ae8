//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;
use perfwatch_core::constants::{
    DEFAULT_BUILD_COMMIT, DEFAULT_MEMORY_REPORT_PATH, DEFAULT_REGRESSION_REPORT_PATH,
};

/// Monitor memory usage and detect leaks in benchmark runs.
#[derive(Parser, Debug)]
#[command(name = "memory-leak-monitor", version, about)]
pub struct LeakMonitorArgs {
    /// Benchmark output file to scan for memory signals.
    #[arg(long)]
    pub benchmark_output: Option<PathBuf>,

    /// Test log to scan for memory status lines.
    #[arg(long)]
    pub test_log: Option<PathBuf>,

    /// SQLite database that receives leak and excessive-usage rows.
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Commit SHA recorded with stored rows.
    #[arg(long, default_value = DEFAULT_BUILD_COMMIT)]
    pub commit: String,

    /// Markdown report path.
    #[arg(long, default_value = DEFAULT_MEMORY_REPORT_PATH)]
    pub report: PathBuf,

    /// Optional JSON dump of leaks, issues, and status failures.
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Config file (default: ./perfwatch.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Detect performance regressions between two benchmark databases.
#[derive(Parser, Debug)]
#[command(name = "regression-detector", version, about)]
pub struct RegressionDetectorArgs {
    /// Baseline SQLite database.
    #[arg(long)]
    pub baseline: PathBuf,

    /// Current run SQLite database.
    #[arg(long)]
    pub current: PathBuf,

    /// Regression threshold in percent (default: 5.0).
    #[arg(long, value_parser = parse_threshold, allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Markdown report path.
    #[arg(long, default_value = DEFAULT_REGRESSION_REPORT_PATH)]
    pub output: PathBuf,

    /// Optional JSON dump of the full analysis.
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Marker file written when a regression is found
    /// (default: regression-detected.flag).
    #[arg(long)]
    pub sentinel: Option<PathBuf>,

    /// Config file (default: ./perfwatch.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Thresholds must be finite and non-negative.
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{s} is not a finite, non-negative percentage"));
    }
    Ok(value)
}
