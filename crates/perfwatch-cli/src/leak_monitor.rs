//! memory-leak-monitor: benchmark output and test logs → leak report.

use anyhow::Result;
use perfwatch_analysis::classify::{FlushOutcome, LeakThresholds, MemoryMonitor};
use perfwatch_analysis::memory::{read_status_log, SignalDocument};
use perfwatch_analysis::report::{
    write_report, JsonReporter, MemoryMarkdownReporter, Reporter,
};
use perfwatch_core::config::CliOverrides;
use perfwatch_core::constants::BENCHMARK_TEST_NAME;
use perfwatch_core::errors::PerfwatchErrorCode;

use crate::cli::LeakMonitorArgs;

/// Run one monitoring pass. Returns 1 when a leak or excessive usage was found.
///
/// A failed flush is logged and the report is still written.
pub fn run(args: &LeakMonitorArgs) -> Result<i32> {
    let config = crate::load_config(args.config.as_deref(), &CliOverrides::default());
    let mut monitor = MemoryMonitor::new(LeakThresholds::from(&config.leak))
        .with_peak_usage_check(config.leak.effective_check_peak_usage());

    if let Some(path) = &args.benchmark_output {
        let document = SignalDocument::open_or_empty(path);
        monitor.observe_signals(document.signals(), BENCHMARK_TEST_NAME);
    }

    if let Some(path) = &args.test_log {
        let failures = monitor.observe_status(read_status_log(path));
        tracing::info!(failures, "scanned test log");
    }

    let snapshot = monitor.finish();

    match snapshot.flush(args.database.as_deref(), &args.commit) {
        Ok(FlushOutcome::Stored { leak_rows, excessive_rows }) => {
            tracing::debug!(leak_rows, excessive_rows, "flush complete");
        }
        Ok(FlushOutcome::Skipped) => {}
        Err(e) => tracing::error!(error = %e.coded_string(), "error storing results"),
    }

    let markdown = MemoryMarkdownReporter::new().generate(&snapshot)?;
    write_report(&args.report, &markdown)?;

    if let Some(path) = &args.json_output {
        write_report(path, &JsonReporter.generate(&snapshot)?)?;
    }

    Ok(snapshot.exit_code())
}
