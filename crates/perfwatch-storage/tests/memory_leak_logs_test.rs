//! Tests for the memory_leak_logs migration and append-only flush.

use perfwatch_core::types::{ExcessiveUsageEvent, LeakEvent};
use perfwatch_storage::connection::open_in_memory;
use perfwatch_storage::migrations::{current_version, run_migrations};
use perfwatch_storage::queries::memory_leak_logs::*;
use perfwatch_storage::store_memory_events;

#[test]
fn migrations_are_idempotent() {
    let conn = open_in_memory().unwrap();
    assert_eq!(current_version(&conn).unwrap(), 1);
    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), 1);
    assert_eq!(count(&conn, None).unwrap(), 0);
}

#[test]
fn leak_row_leaves_peak_null() {
    let conn = open_in_memory().unwrap();
    let leak = LeakEvent::new("benchmark", 1000.7, 5000.2);
    insert_leak(&conn, "2024-01-01T00:00:00", "deadbeef", &leak).unwrap();

    let rows = query_recent(&conn, 10).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.memory_status, STATUS_LEAK_DETECTED);
    assert_eq!(row.initial_memory_kb, Some(1000));
    assert_eq!(row.final_memory_kb, Some(5000));
    assert_eq!(row.leaked_memory_kb, Some(3999));
    assert_eq!(row.peak_memory_kb, None);
    assert_eq!(row.status_code, Some(-1));
    assert_eq!(row.error_message, None);
}

#[test]
fn excessive_row_uses_peak_column() {
    let conn = open_in_memory().unwrap();
    let issue = ExcessiveUsageEvent::new("benchmark", 20.0 * 1024.0 * 1024.0, 16.0);
    insert_excessive_usage(&conn, "2024-01-01T00:00:00", "deadbeef", &issue).unwrap();

    let row = &query_recent(&conn, 1).unwrap()[0];
    assert_eq!(row.memory_status, STATUS_EXCESSIVE_USAGE);
    assert_eq!(row.peak_memory_kb, Some(20_971_520));
    assert_eq!(row.initial_memory_kb, None);
    assert_eq!(row.leaked_memory_kb, None);
    assert_eq!(row.status_code, Some(-2));
}

#[test]
fn flush_appends_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("monitor.sqlite");
    let leaks = vec![LeakEvent::new("a", 0.0, 4096.0)];
    let issues = vec![ExcessiveUsageEvent::new("b", 17.0 * 1024.0 * 1024.0, 16.0)];

    let first = store_memory_events(&db, "c1", &leaks, &issues).unwrap();
    assert_eq!(first.leak_rows, 1);
    assert_eq!(first.excessive_rows, 1);
    store_memory_events(&db, "c2", &leaks, &[]).unwrap();

    let conn = rusqlite::Connection::open(&db).unwrap();
    assert_eq!(count(&conn, None).unwrap(), 3);
    assert_eq!(count(&conn, Some("c1")).unwrap(), 2);
    assert_eq!(count(&conn, Some("c2")).unwrap(), 1);

    let newest = &query_recent(&conn, 1).unwrap()[0];
    assert_eq!(newest.build_commit, "c2");
    assert!(!newest.test_time.is_empty());
}

#[test]
fn flush_into_unwritable_location_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("missing-dir").join("monitor.sqlite");
    let leaks = vec![LeakEvent::new("a", 0.0, 4096.0)];
    assert!(store_memory_events(&db, "c1", &leaks, &[]).is_err());
}
