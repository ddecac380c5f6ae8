//! Leak monitor configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{EXCESSIVE_MEMORY_THRESHOLD_GB, LEAK_THRESHOLD_KB};

/// Thresholds for the memory leak monitor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LeakConfig {
    /// Growth above this many KB is a leak. Default: 1024.
    pub leak_threshold_kb: Option<f64>,
    /// Usage above this many GB is excessive. Default: 16.
    pub excessive_threshold_gb: Option<f64>,
    /// Check the largest usage signal against the excessive threshold. Default: true.
    pub check_peak_usage: Option<bool>,
}

impl LeakConfig {
    pub fn effective_leak_threshold_kb(&self) -> f64 {
        self.leak_threshold_kb.unwrap_or(LEAK_THRESHOLD_KB)
    }

    pub fn effective_excessive_threshold_gb(&self) -> f64 {
        self.excessive_threshold_gb
            .unwrap_or(EXCESSIVE_MEMORY_THRESHOLD_GB)
    }

    pub fn effective_check_peak_usage(&self) -> bool {
        self.check_peak_usage.unwrap_or(true)
    }
}
