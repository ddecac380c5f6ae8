//! Storage errors.

use super::error_code::{self, PerfwatchErrorCode};

/// Errors raised by the SQLite persistence adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database not found: {path}")]
    DatabaseNotFound { path: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },
}

impl PerfwatchErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::DatabaseNotFound { .. } => error_code::DB_NOT_FOUND,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
        }
    }
}
