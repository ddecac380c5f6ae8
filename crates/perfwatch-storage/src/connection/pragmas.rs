//! Connection pragmas.

use perfwatch_core::errors::StorageError;
use rusqlite::Connection;

/// Milliseconds to wait on a locked database before giving up.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Apply pragmas shared by read and write connections.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
        .map_err(|e| StorageError::SqliteError {
            message: format!("failed to apply pragmas: {e}"),
        })
}
