//! Reads from the llama-bench `test` table. The schema is owned elsewhere;
//! every column present in the table is carried into the record.

use perfwatch_core::constants::BENCHMARK_TABLE;
use perfwatch_core::errors::StorageError;
use perfwatch_core::types::{BenchmarkRecord, FieldValue};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

/// Load every benchmark row, preserving row and column order.
pub fn load_benchmarks(conn: &Connection) -> Result<Vec<BenchmarkRecord>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {BENCHMARK_TABLE}"))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();

    let rows = stmt
        .query_map([], |row| {
            let mut record = BenchmarkRecord::new();
            for (idx, name) in names.iter().enumerate() {
                record = record.with(name.as_str(), field_value(row.get_ref(idx)?));
            }
            Ok(record)
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Count benchmark rows.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {BENCHMARK_TABLE}"), [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

fn field_value(value: ValueRef<'_>) -> FieldValue {
    match value {
        ValueRef::Null => FieldValue::Null,
        ValueRef::Integer(i) => FieldValue::Int(i),
        ValueRef::Real(r) => FieldValue::Real(r),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            FieldValue::Text(String::from_utf8_lossy(t).into_owned())
        }
    }
}
