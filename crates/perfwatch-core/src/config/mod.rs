//! Configuration system for perfwatch.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod leak_config;
pub mod perfwatch_config;
pub mod regression_config;

pub use leak_config::LeakConfig;
pub use perfwatch_config::{CliOverrides, PerfwatchConfig};
pub use regression_config::RegressionConfig;
