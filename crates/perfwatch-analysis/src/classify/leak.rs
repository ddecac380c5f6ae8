//! Fixed-threshold rules. Both comparisons are strict.

use perfwatch_core::config::LeakConfig;
use perfwatch_core::constants::{EXCESSIVE_MEMORY_THRESHOLD_GB, KB_PER_GB, LEAK_THRESHOLD_KB};
use perfwatch_core::types::LeakEvent;

/// Thresholds applied by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakThresholds {
    pub leak_kb: f64,
    pub excessive_gb: f64,
}

impl Default for LeakThresholds {
    fn default() -> Self {
        Self {
            leak_kb: LEAK_THRESHOLD_KB,
            excessive_gb: EXCESSIVE_MEMORY_THRESHOLD_GB,
        }
    }
}

impl From<&LeakConfig> for LeakThresholds {
    fn from(config: &LeakConfig) -> Self {
        Self {
            leak_kb: config.effective_leak_threshold_kb(),
            excessive_gb: config.effective_excessive_threshold_gb(),
        }
    }
}

/// A leak exists iff `final_kb - initial_kb` is strictly above `threshold_kb`.
/// Shrinking or flat memory is never a leak.
pub fn detect_leak(
    initial_kb: f64,
    final_kb: f64,
    test_name: &str,
    threshold_kb: f64,
) -> Option<LeakEvent> {
    let leaked_kb = final_kb - initial_kb;
    (leaked_kb > threshold_kb).then(|| LeakEvent::new(test_name, initial_kb, final_kb))
}

/// True iff `memory_kb`, in GB, is strictly above `threshold_gb`.
pub fn exceeds_usage_threshold(memory_kb: f64, threshold_gb: f64) -> bool {
    memory_kb / KB_PER_GB > threshold_gb
}
