//! Reporters: markdown for people, JSON for CI.

pub mod json;
pub mod markdown;
pub mod memory;

use std::path::Path;

use perfwatch_core::errors::ReportError;

pub use json::JsonReporter;
pub use markdown::RegressionMarkdownReporter;
pub use memory::MemoryMarkdownReporter;

/// Renders one kind of result into a document.
pub trait Reporter<T: ?Sized> {
    fn name(&self) -> &'static str;
    fn generate(&self, input: &T) -> Result<String, ReportError>;
}

/// Write a rendered document, replacing any previous file.
pub fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|e| ReportError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

/// Generated-at line shared by the markdown reporters.
fn generated_line(at: chrono::DateTime<chrono::Local>) -> String {
    format!("**Generated:** {}\n\n", at.format("%Y-%m-%d %H:%M:%S"))
}
