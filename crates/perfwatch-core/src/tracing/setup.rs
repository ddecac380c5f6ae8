//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "PERFWATCH_LOG";

/// Initialize the perfwatch tracing/logging system.
///
/// Reads `PERFWATCH_LOG` for per-target log levels, e.g.
/// `PERFWATCH_LOG=perfwatch_storage=debug,perfwatch_analysis=info`.
///
/// Falls back to `info` for all perfwatch crates, or `debug` when `verbose`
/// is set. Calling it more than once is a no-op.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    });
}

/// Filter directive used when `PERFWATCH_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    [
        "perfwatch_core",
        "perfwatch_storage",
        "perfwatch_analysis",
        "perfwatch_cli",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .collect::<Vec<_>>()
    .join(",")
}
