//! Report rendering errors.

use super::error_code::{self, PerfwatchErrorCode};

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

impl PerfwatchErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
