//! Tests for loading benchmark records from the llama-bench `test` table.

mod common;

use common::{create_bench_db, BenchRow};
use perfwatch_core::errors::StorageError;
use perfwatch_core::types::{FieldValue, KeyProperty};
use perfwatch_storage::connection::open_read_only;
use perfwatch_storage::queries::benchmarks;
use perfwatch_storage::{load_results, try_load_results};

#[test]
fn loads_rows_with_typed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("bench.sqlite");
    create_bench_db(
        &db,
        &[
            BenchRow { model_type: "llama-7b", backends: "cpu", n_prompt: 128, n_gen: 128, avg_ts: 50.0, avg_ns: 20_000_000 },
            BenchRow { model_type: "llama-13b", backends: "cuda", n_prompt: 512, n_gen: 0, avg_ts: 900.5, avg_ns: 1_100_000 },
        ],
    );

    let records = try_load_results(&db).unwrap();
    assert_eq!(records.len(), 2);
    let conn = open_read_only(&db).unwrap();
    assert_eq!(benchmarks::count(&conn).unwrap(), 2);

    let first = &records[0];
    assert_eq!(first.model_type(), Some("llama-7b"));
    assert_eq!(first.avg_ts(), Some(50.0));
    assert_eq!(first.avg_ns(), Some(20_000_000.0));
    assert_eq!(first.build_commit(), Some("abc123"));
    assert_eq!(first.build_number(), Some(42));
    assert_eq!(first.key_property(KeyProperty::NThreads), Some(&FieldValue::Int(8)));
    assert_eq!(records[1].key_property(KeyProperty::Backends), Some(&FieldValue::Text("cuda".into())));
}

#[test]
fn column_order_follows_table_definition() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("bench.sqlite");
    create_bench_db(
        &db,
        &[BenchRow { model_type: "m", backends: "cpu", n_prompt: 1, n_gen: 1, avg_ts: 1.0, avg_ns: 1 }],
    );

    let records = try_load_results(&db).unwrap();
    let names: Vec<&str> = records[0].columns().map(|(n, _)| n).collect();
    assert_eq!(names.first(), Some(&"build_commit"));
    assert_eq!(names.last(), Some(&"stddev_ts"));
    assert_eq!(names.len(), 17);
}

#[test]
fn missing_database_is_not_found_and_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("absent.sqlite");

    assert!(matches!(try_load_results(&db), Err(StorageError::DatabaseNotFound { .. })));
    assert!(load_results(&db).is_empty());
    assert!(!db.exists(), "loading must not create the database");
}

#[test]
fn missing_table_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("empty.sqlite");
    rusqlite::Connection::open(&db)
        .unwrap()
        .execute_batch("CREATE TABLE other (x INTEGER);")
        .unwrap();

    assert!(matches!(try_load_results(&db), Err(StorageError::SqliteError { .. })));
    assert!(load_results(&db).is_empty());
}

#[test]
fn null_metric_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("bench.sqlite");
    let conn = rusqlite::Connection::open(&db).unwrap();
    conn.execute_batch(common::BENCH_SCHEMA).unwrap();
    conn.execute("INSERT INTO test (model_type, avg_ts) VALUES ('m', NULL)", []).unwrap();
    drop(conn);

    let records = load_results(&db);
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("avg_ts"));
    assert_eq!(records[0].avg_ts(), None);
}
