//! Per-run collector for leak and usage events.
//!
//! The monitor is owned by one monitoring run. Passes append to it; once the
//! run is done, [`MemoryMonitor::finish`] freezes it into a [`MonitorSnapshot`]
//! that feeds storage and reports.

use std::path::Path;

use perfwatch_core::errors::StorageError;
use perfwatch_core::types::{ExcessiveUsageEvent, LeakEvent, MemorySignal, StatusObservation};
use serde::Serialize;

use super::leak::{self, LeakThresholds};

/// What one benchmark-output pass found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalPassSummary {
    pub signals: usize,
    pub leak_detected: bool,
    pub excessive_usage: bool,
}

/// Append-only collector for one monitoring run.
#[derive(Debug, Default)]
pub struct MemoryMonitor {
    thresholds: LeakThresholds,
    check_peak_usage: bool,
    leaks: Vec<LeakEvent>,
    issues: Vec<ExcessiveUsageEvent>,
    status_failures: Vec<StatusObservation>,
}

impl MemoryMonitor {
    pub fn new(thresholds: LeakThresholds) -> Self {
        Self {
            thresholds,
            check_peak_usage: true,
            ..Self::default()
        }
    }

    /// Whether benchmark passes also check their largest usage signal.
    pub fn with_peak_usage_check(mut self, enabled: bool) -> Self {
        self.check_peak_usage = enabled;
        self
    }

    /// Record a leak if memory grew past the leak threshold.
    pub fn detect_leak(
        &mut self,
        initial_kb: f64,
        final_kb: f64,
        test_name: &str,
    ) -> Option<&LeakEvent> {
        let event = leak::detect_leak(initial_kb, final_kb, test_name, self.thresholds.leak_kb)?;
        tracing::warn!(
            test_name,
            leaked_mb = %format!("{:.2}", event.leaked_memory_mb),
            "memory leak detected"
        );
        self.leaks.push(event);
        self.leaks.last()
    }

    /// Record an excessive-usage issue if `memory_kb` is above the ceiling.
    pub fn check_excessive_usage(&mut self, memory_kb: f64, test_name: &str) -> bool {
        let threshold_gb = self.thresholds.excessive_gb;
        if !leak::exceeds_usage_threshold(memory_kb, threshold_gb) {
            return false;
        }
        let issue = ExcessiveUsageEvent::new(test_name, memory_kb, threshold_gb);
        tracing::warn!(
            test_name,
            memory_gb = %format!("{:.2}", issue.memory_gb),
            threshold_gb,
            "excessive memory usage"
        );
        self.issues.push(issue);
        true
    }

    /// Benchmark-output pass.
    ///
    /// With at least two signals, the first and last in document order are
    /// the before/after pair for leak detection. When the peak check is on,
    /// the largest live/peak usage signal is checked against the ceiling.
    pub fn observe_signals<I>(&mut self, signals: I, test_name: &str) -> SignalPassSummary
    where
        I: IntoIterator<Item = MemorySignal>,
    {
        let mut first: Option<f64> = None;
        let mut last: Option<f64> = None;
        let mut peak_usage: Option<f64> = None;
        let mut count = 0;

        for signal in signals {
            count += 1;
            first.get_or_insert(signal.value_kb);
            last = Some(signal.value_kb);
            if signal.kind.is_usage() {
                peak_usage = Some(peak_usage.map_or(signal.value_kb, |p: f64| p.max(signal.value_kb)));
            }
        }
        tracing::info!(test_name, count, "parsed memory records");

        let mut summary = SignalPassSummary {
            signals: count,
            ..Default::default()
        };
        if let (true, Some(initial), Some(last)) = (count >= 2, first, last) {
            summary.leak_detected = self.detect_leak(initial, last, test_name).is_some();
        }
        if let (true, Some(peak)) = (self.check_peak_usage, peak_usage) {
            summary.excessive_usage = self.check_excessive_usage(peak, test_name);
        }
        summary
    }

    /// Test-log pass. Failing observations are kept for the report; they do
    /// not create leak events. Returns the number of failures seen.
    pub fn observe_status<I>(&mut self, observations: I) -> usize
    where
        I: IntoIterator<Item = StatusObservation>,
    {
        let before = self.status_failures.len();
        for record in observations.into_iter().filter(|r| r.is_failure) {
            tracing::error!(
                line_number = record.line_number,
                line = %record.line,
                "memory failure"
            );
            self.status_failures.push(record);
        }
        self.status_failures.len() - before
    }

    pub fn leaks(&self) -> &[LeakEvent] {
        &self.leaks
    }

    pub fn excessive_usage(&self) -> &[ExcessiveUsageEvent] {
        &self.issues
    }

    pub fn has_issues(&self) -> bool {
        !self.leaks.is_empty() || !self.issues.is_empty()
    }

    /// Freeze the collected events.
    pub fn finish(self) -> MonitorSnapshot {
        MonitorSnapshot {
            leak_threshold_kb: self.thresholds.leak_kb,
            excessive_threshold_gb: self.thresholds.excessive_gb,
            leaks: self.leaks,
            excessive_usage: self.issues,
            status_failures: self.status_failures,
        }
    }
}

/// Result of a flush attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// No database configured.
    Skipped,
    Stored { leak_rows: usize, excessive_rows: usize },
}

/// Immutable view of one monitoring run.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    pub leak_threshold_kb: f64,
    pub excessive_threshold_gb: f64,
    pub leaks: Vec<LeakEvent>,
    pub excessive_usage: Vec<ExcessiveUsageEvent>,
    pub status_failures: Vec<StatusObservation>,
}

impl MonitorSnapshot {
    /// Leaks or excessive usage were found. Status failures alone do not count.
    pub fn has_issues(&self) -> bool {
        !self.leaks.is_empty() || !self.excessive_usage.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_issues())
    }

    /// Append both collections to `memory_leak_logs`.
    pub fn flush(&self, db: Option<&Path>, build_commit: &str) -> Result<FlushOutcome, StorageError> {
        let Some(db) = db else {
            tracing::warn!("no database path configured, skipping storage");
            return Ok(FlushOutcome::Skipped);
        };
        let summary = perfwatch_storage::store_memory_events(
            db,
            build_commit,
            &self.leaks,
            &self.excessive_usage,
        )?;
        Ok(FlushOutcome::Stored {
            leak_rows: summary.leak_rows,
            excessive_rows: summary.excessive_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::scan_signals;
    use perfwatch_core::types::SignalKind;

    fn signal(kind: SignalKind, value_kb: f64) -> MemorySignal {
        MemorySignal {
            kind,
            value_kb,
            original_value: value_kb.to_string(),
            unit: "KB".to_string(),
        }
    }

    #[test]
    fn first_and_last_signal_form_the_pair() {
        let mut monitor = MemoryMonitor::new(LeakThresholds::default());
        let summary = monitor.observe_signals(
            vec![
                signal(SignalKind::MemoryUsage, 1000.0),
                signal(SignalKind::MemoryUsage, 900_000.0),
                signal(SignalKind::MemoryUsage, 5000.0),
            ],
            "bench",
        );
        assert_eq!(summary.signals, 3);
        assert!(summary.leak_detected);
        assert_eq!(monitor.leaks()[0].leaked_memory_kb, 4000.0);
    }

    #[test]
    fn single_signal_never_leaks() {
        let mut monitor = MemoryMonitor::new(LeakThresholds::default());
        let summary = monitor.observe_signals(vec![signal(SignalKind::MemoryUsage, 1.0)], "bench");
        assert!(!summary.leak_detected);
        assert!(monitor.leaks().is_empty());
    }

    #[test]
    fn documented_scenario_has_no_leak() {
        let text = "model size: 1.0 GiB\n...\nmemory usage: 2 MB\n...\npeak memory: 0.5 GB\n";
        let mut monitor = MemoryMonitor::new(LeakThresholds::default());
        let summary = monitor.observe_signals(scan_signals(text), "benchmark");
        assert_eq!(summary.signals, 3);
        assert!(!summary.leak_detected);
        assert!(!summary.excessive_usage);
        assert!(!monitor.has_issues());
    }

    #[test]
    fn peak_usage_check_ignores_model_size() {
        let huge = 20.0 * 1024.0 * 1024.0;
        let mut monitor = MemoryMonitor::new(LeakThresholds::default());
        monitor.observe_signals(vec![signal(SignalKind::ModelSize, huge)], "bench");
        assert!(monitor.excessive_usage().is_empty());

        monitor.observe_signals(
            vec![signal(SignalKind::PeakMemory, huge), signal(SignalKind::PeakMemory, 1.0)],
            "bench",
        );
        assert_eq!(monitor.excessive_usage().len(), 1);
        assert_eq!(monitor.excessive_usage()[0].memory_gb, 20.0);
    }

    #[test]
    fn peak_usage_check_can_be_disabled() {
        let huge = 20.0 * 1024.0 * 1024.0;
        let mut monitor =
            MemoryMonitor::new(LeakThresholds::default()).with_peak_usage_check(false);
        let summary = monitor.observe_signals(vec![signal(SignalKind::PeakMemory, huge)], "bench");
        assert!(!summary.excessive_usage);
        assert!(!monitor.has_issues());
    }

    #[test]
    fn status_failures_do_not_count_as_issues() {
        let mut monitor = MemoryMonitor::new(LeakThresholds::default());
        let failures = monitor.observe_status(vec![
            StatusObservation::from_code(1, 0, "memory status: 0"),
            StatusObservation::from_code(2, 3, "memory status: 3"),
            StatusObservation::issue(3, "memory error"),
        ]);
        assert_eq!(failures, 2);
        let snapshot = monitor.finish();
        assert_eq!(snapshot.status_failures.len(), 2);
        assert!(!snapshot.has_issues());
        assert_eq!(snapshot.exit_code(), 0);
    }

    #[test]
    fn flush_without_database_is_skipped() {
        let mut monitor = MemoryMonitor::new(LeakThresholds::default());
        monitor.detect_leak(0.0, 8192.0, "t");
        let snapshot = monitor.finish();
        assert_eq!(snapshot.flush(None, "abc").unwrap(), FlushOutcome::Skipped);
        assert_eq!(snapshot.exit_code(), 1);
    }
}
