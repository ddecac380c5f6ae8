//! Queries for the memory_leak_logs table: append-only leak/issue rows.

use perfwatch_core::constants::{EXCESSIVE_ROW_STATUS_CODE, LEAK_ROW_STATUS_CODE};
use perfwatch_core::errors::StorageError;
use perfwatch_core::types::{ExcessiveUsageEvent, LeakEvent};
use rusqlite::{params, Connection};

pub const STATUS_LEAK_DETECTED: &str = "LEAK_DETECTED";
pub const STATUS_EXCESSIVE_USAGE: &str = "EXCESSIVE_USAGE";

/// A memory_leak_logs row.
#[derive(Debug, Clone)]
pub struct MemoryLeakLogRow {
    pub id: i64,
    pub test_time: String,
    pub build_commit: String,
    pub test_name: String,
    pub memory_status: String,
    pub initial_memory_kb: Option<i64>,
    pub final_memory_kb: Option<i64>,
    pub peak_memory_kb: Option<i64>,
    pub leaked_memory_kb: Option<i64>,
    pub status_code: Option<i64>,
    pub error_message: Option<String>,
}

/// Append a LEAK_DETECTED row. KB values are truncated to integers.
pub fn insert_leak(
    conn: &Connection,
    test_time: &str,
    build_commit: &str,
    leak: &LeakEvent,
) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO memory_leak_logs (
            test_time, build_commit, test_name, memory_status,
            initial_memory_kb, final_memory_kb, leaked_memory_kb, status_code
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            test_time,
            build_commit,
            leak.test_name,
            STATUS_LEAK_DETECTED,
            leak.initial_memory_kb as i64,
            leak.final_memory_kb as i64,
            leak.leaked_memory_kb as i64,
            LEAK_ROW_STATUS_CODE,
        ])
    })
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Append an EXCESSIVE_USAGE row; usage lands in `peak_memory_kb`.
pub fn insert_excessive_usage(
    conn: &Connection,
    test_time: &str,
    build_commit: &str,
    issue: &ExcessiveUsageEvent,
) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO memory_leak_logs (
            test_time, build_commit, test_name, memory_status,
            peak_memory_kb, status_code
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            test_time,
            build_commit,
            issue.test_name,
            STATUS_EXCESSIVE_USAGE,
            issue.memory_kb as i64,
            EXCESSIVE_ROW_STATUS_CODE,
        ])
    })
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Most recent rows first.
pub fn query_recent(conn: &Connection, limit: usize) -> Result<Vec<MemoryLeakLogRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, test_time, build_commit, test_name, memory_status,
                    initial_memory_kb, final_memory_kb, peak_memory_kb,
                    leaked_memory_kb, status_code, error_message
             FROM memory_leak_logs ORDER BY id DESC LIMIT ?1",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(MemoryLeakLogRow {
                id: row.get(0)?,
                test_time: row.get(1)?,
                build_commit: row.get(2)?,
                test_name: row.get(3)?,
                memory_status: row.get(4)?,
                initial_memory_kb: row.get(5)?,
                final_memory_kb: row.get(6)?,
                peak_memory_kb: row.get(7)?,
                leaked_memory_kb: row.get(8)?,
                status_code: row.get(9)?,
                error_message: row.get(10)?,
            })
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Count rows, optionally restricted to one commit.
pub fn count(conn: &Connection, build_commit: Option<&str>) -> Result<i64, StorageError> {
    let result = match build_commit {
        Some(commit) => conn.query_row(
            "SELECT COUNT(*) FROM memory_leak_logs WHERE build_commit = ?1",
            params![commit],
            |row| row.get(0),
        ),
        None => conn.query_row("SELECT COUNT(*) FROM memory_leak_logs", [], |row| row.get(0)),
    };
    result.map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
