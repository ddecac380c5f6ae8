//! JSON reporter: pretty-printed dump of any serializable result.

use perfwatch_core::errors::ReportError;
use serde::Serialize;

use super::Reporter;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl<T: Serialize + ?Sized> Reporter<T> for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, input: &T) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(input)?)
    }
}
