//! Top-level perfwatch configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LeakConfig, RegressionConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

pub const ENV_THRESHOLD: &str = "PERFWATCH_THRESHOLD";
pub const ENV_LEAK_THRESHOLD_KB: &str = "PERFWATCH_LEAK_THRESHOLD_KB";
pub const ENV_EXCESSIVE_THRESHOLD_GB: &str = "PERFWATCH_EXCESSIVE_THRESHOLD_GB";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PERFWATCH_*`)
/// 3. Project config (`perfwatch.toml`, or an explicit `--config` path)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PerfwatchConfig {
    pub leak: LeakConfig,
    pub regression: RegressionConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threshold_pct: Option<f64>,
    pub sentinel_path: Option<String>,
}

impl PerfwatchConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist. Without one, `perfwatch.toml` in
    /// `root` is used when present.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_path = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Some(root.join(PROJECT_CONFIG_FILE)).filter(|p| p.exists()),
        };
        if let Some(path) = project_path {
            Self::merge_toml_file(&mut config, &path)?;
            tracing::debug!(path = %path.display(), "loaded project config");
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PerfwatchConfig) -> Result<(), ConfigError> {
        let checks: [(&str, Option<f64>); 3] = [
            ("regression.threshold_pct", config.regression.threshold_pct),
            ("leak.leak_threshold_kb", config.leak.leak_threshold_kb),
            ("leak.excessive_threshold_gb", config.leak.excessive_threshold_gb),
        ];
        for (field, value) in checks {
            if let Some(v) = value {
                check_threshold(field, v)?;
            }
        }
        for (metric, v) in &config.regression.metric_thresholds {
            check_threshold(&format!("regression.metric_thresholds.{metric}"), *v)?;
        }
        Ok(())
    }

    /// Apply `PERFWATCH_*` overrides read through `lookup`.
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides<F>(config: &mut PerfwatchConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env_f64(&lookup, ENV_THRESHOLD) {
            config.regression.threshold_pct = Some(v);
        }
        if let Some(v) = env_f64(&lookup, ENV_LEAK_THRESHOLD_KB) {
            config.leak.leak_threshold_kb = Some(v);
        }
        if let Some(v) = env_f64(&lookup, ENV_EXCESSIVE_THRESHOLD_GB) {
            config.leak.excessive_threshold_gb = Some(v);
        }
    }

    /// Apply CLI flag overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut PerfwatchConfig, cli: &CliOverrides) {
        if cli.threshold_pct.is_some() {
            config.regression.threshold_pct = cli.threshold_pct;
        }
        if cli.sentinel_path.is_some() {
            config.regression.sentinel_path = cli.sentinel_path.clone();
        }
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut PerfwatchConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PerfwatchConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut PerfwatchConfig, other: &PerfwatchConfig) {
        if other.leak.leak_threshold_kb.is_some() {
            base.leak.leak_threshold_kb = other.leak.leak_threshold_kb;
        }
        if other.leak.excessive_threshold_gb.is_some() {
            base.leak.excessive_threshold_gb = other.leak.excessive_threshold_gb;
        }
        if other.leak.check_peak_usage.is_some() {
            base.leak.check_peak_usage = other.leak.check_peak_usage;
        }

        if other.regression.threshold_pct.is_some() {
            base.regression.threshold_pct = other.regression.threshold_pct;
        }
        if !other.regression.metrics.is_empty() {
            base.regression.metrics = other.regression.metrics.clone();
        }
        for (metric, threshold) in &other.regression.metric_thresholds {
            base.regression
                .metric_thresholds
                .insert(metric.clone(), *threshold);
        }
        if other.regression.sentinel_path.is_some() {
            base.regression.sentinel_path = other.regression.sentinel_path.clone();
        }
    }
}

fn env_f64<F>(lookup: &F, key: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring unparseable env override");
            None
        }
    }
}

fn check_threshold(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be a finite, non-negative number".to_string(),
        });
    }
    Ok(())
}
