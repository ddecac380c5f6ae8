//! Schema migrations for tables perfwatch owns.
//!
//! The database is shared with llama-bench, so versions are tracked in a
//! dedicated `perfwatch_schema` table instead of `PRAGMA user_version`.

pub mod v001_memory_leak_logs;

use perfwatch_core::errors::StorageError;
use rusqlite::{params, Connection};

const VERSION_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS perfwatch_schema (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(VERSION_TABLE_SQL)
        .map_err(|e| StorageError::MigrationFailed {
            version: 0,
            message: e.to_string(),
        })?;
    let current = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[(v001_memory_leak_logs::MIGRATION_SQL, 1)];

    for (sql, version) in migrations {
        if current < *version {
            conn.execute_batch(sql).map_err(|e| StorageError::MigrationFailed {
                version: *version,
                message: e.to_string(),
            })?;
            conn.execute(
                "INSERT INTO perfwatch_schema (version, applied_at) VALUES (?1, ?2)",
                params![version, chrono::Local::now().to_rfc3339()],
            )
            .map_err(|e| StorageError::MigrationFailed {
                version: *version,
                message: e.to_string(),
            })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current perfwatch schema version (0 when nothing is applied).
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM perfwatch_schema",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
