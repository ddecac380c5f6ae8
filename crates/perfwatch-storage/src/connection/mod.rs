//! Connection helpers: read-only opens for loads, writable opens for flushes.

pub mod pragmas;
pub mod writer;

use std::path::Path;

use perfwatch_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use self::pragmas::apply_pragmas;
use crate::migrations;

/// Open an existing database read-only. A missing file is `DatabaseNotFound`.
pub fn open_read_only(path: &Path) -> Result<Connection, StorageError> {
    if !path.exists() {
        return Err(StorageError::DatabaseNotFound {
            path: path.display().to_string(),
        });
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

/// Open (creating if needed) a database for writing and run migrations.
pub fn open_for_write(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path).map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    apply_pragmas(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with migrations applied (for testing).
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    apply_pragmas(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
