//! Extraction errors.

use super::error_code::{self, PerfwatchErrorCode};

/// Errors raised while turning raw benchmark output or logs into signals.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Malformed magnitude '{literal}': {message}")]
    MalformedMagnitude { literal: String, message: String },

    #[error("Unknown memory unit '{0}'")]
    UnknownUnit(String),
}

impl PerfwatchErrorCode for ExtractError {
    fn error_code(&self) -> &'static str {
        error_code::EXTRACT_ERROR
    }
}
