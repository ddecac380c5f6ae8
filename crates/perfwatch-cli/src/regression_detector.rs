//! regression-detector: baseline vs current databases → regression report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use perfwatch_analysis::aggregate::{analyze_with, RunStatus};
use perfwatch_analysis::regression::EvaluationPolicy;
use perfwatch_analysis::report::{
    write_report, JsonReporter, RegressionMarkdownReporter, Reporter,
};
use perfwatch_core::config::CliOverrides;
use perfwatch_storage::load_results;

use crate::cli::RegressionDetectorArgs;

/// Compare the two databases. Returns 1 on regression, 0 otherwise, and
/// touches the sentinel file when a regression is found.
pub fn run(args: &RegressionDetectorArgs) -> Result<i32> {
    let overrides = CliOverrides {
        threshold_pct: args.threshold,
        sentinel_path: args.sentinel.as_ref().map(|p| p.display().to_string()),
    };
    let config = crate::load_config(args.config.as_deref(), &overrides);
    let policy = EvaluationPolicy::from_config(&config.regression);

    let baseline = load_results(&args.baseline);
    let current = load_results(&args.current);
    let report = analyze_with(&baseline, &current, &policy);

    let markdown = RegressionMarkdownReporter::new().generate(&report)?;
    write_report(&args.output, &markdown)?;

    if let Some(path) = &args.json_output {
        write_report(path, &JsonReporter.generate(&report)?)?;
        tracing::info!(path = %path.display(), "JSON report written");
    }

    if report.status == RunStatus::Regression {
        let sentinel = PathBuf::from(config.regression.effective_sentinel_path());
        std::fs::write(&sentinel, b"")
            .with_context(|| format!("writing {}", sentinel.display()))?;
        tracing::error!(
            affected = report.regressions.len(),
            "performance regression detected"
        );
    } else {
        tracing::info!(status = report.status.as_str(), "no performance regressions detected");
    }

    Ok(report.exit_code())
}
