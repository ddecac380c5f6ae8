//! PerfwatchErrorCode trait for CI-facing error codes.

/// Every error enum provides a stable code string that CI logs can grep for.
pub trait PerfwatchErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_NOT_FOUND: &str = "DB_NOT_FOUND";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const EXTRACT_ERROR: &str = "EXTRACT_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
