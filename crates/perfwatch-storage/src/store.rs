//! Logical operations over a database file: one load, or one flush.
//! Each opens its own connection and closes it on every exit path.

use std::path::Path;

use perfwatch_core::errors::{PerfwatchErrorCode, StorageError};
use perfwatch_core::types::{BenchmarkRecord, ExcessiveUsageEvent, LeakEvent};

use crate::connection::{self, writer::with_immediate_transaction};
use crate::queries::{benchmarks, memory_leak_logs};

/// Rows written by one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    pub leak_rows: usize,
    pub excessive_rows: usize,
}

/// Load benchmark results, surfacing every failure.
pub fn try_load_results(path: &Path) -> Result<Vec<BenchmarkRecord>, StorageError> {
    let conn = connection::open_read_only(path)?;
    benchmarks::load_benchmarks(&conn)
}

/// Load benchmark results, degrading to an empty set.
///
/// A missing database logs a warning; a schema or read failure logs an error.
pub fn load_results(path: &Path) -> Vec<BenchmarkRecord> {
    match try_load_results(path) {
        Ok(records) => {
            tracing::info!(path = %path.display(), count = records.len(), "loaded benchmark results");
            records
        }
        Err(StorageError::DatabaseNotFound { .. }) => {
            tracing::warn!(path = %path.display(), "database not found");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e.coded_string(),
                "error reading database"
            );
            Vec::new()
        }
    }
}

/// Append all leak and excessive-usage events in one transaction.
///
/// Each row gets its own local timestamp at insert time. On failure nothing
/// from this flush is kept.
pub fn store_memory_events(
    path: &Path,
    build_commit: &str,
    leaks: &[LeakEvent],
    issues: &[ExcessiveUsageEvent],
) -> Result<FlushSummary, StorageError> {
    let conn = connection::open_for_write(path)?;
    let summary = with_immediate_transaction(&conn, |tx| {
        for leak in leaks {
            memory_leak_logs::insert_leak(tx, &row_timestamp(), build_commit, leak)?;
        }
        for issue in issues {
            memory_leak_logs::insert_excessive_usage(tx, &row_timestamp(), build_commit, issue)?;
        }
        Ok(FlushSummary {
            leak_rows: leaks.len(),
            excessive_rows: issues.len(),
        })
    })?;
    tracing::info!(
        leak_rows = summary.leak_rows,
        excessive_rows = summary.excessive_rows,
        "stored memory monitoring results"
    );
    Ok(summary)
}

/// Local time without offset, microsecond precision.
fn row_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
