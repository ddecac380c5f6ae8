//! Error handling for perfwatch.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod extract_error;
pub mod report_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::PerfwatchErrorCode;
pub use extract_error::ExtractError;
pub use report_error::ReportError;
pub use storage_error::StorageError;
