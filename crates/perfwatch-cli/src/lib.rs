//! Entry points for the two perfwatch tools.
//!
//! Each command returns the process exit code; the binaries only parse
//! arguments, install tracing, and exit.

pub mod cli;
pub mod leak_monitor;
pub mod regression_detector;

use std::path::Path;

use perfwatch_core::config::{CliOverrides, PerfwatchConfig};
use perfwatch_core::errors::PerfwatchErrorCode;

/// Resolve configuration, falling back to defaults when the file, the
/// environment, or a flag is unusable. Flags survive the fallback only if
/// they validate on their own.
pub(crate) fn load_config(config_path: Option<&Path>, cli: &CliOverrides) -> PerfwatchConfig {
    let root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    match PerfwatchConfig::load(&root, config_path, Some(cli)) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e.coded_string(), "invalid configuration, using defaults");
            let mut config = PerfwatchConfig::default();
            PerfwatchConfig::apply_cli_overrides(&mut config, cli);
            if let Err(e) = PerfwatchConfig::validate(&config) {
                tracing::warn!(error = %e.coded_string(), "ignoring invalid threshold flag");
                config.regression.threshold_pct = None;
            }
            config
        }
    }
}
