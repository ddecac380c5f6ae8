//! Leak and excessive-usage events emitted by the memory classifier.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::constants::{KB_PER_GB, KB_PER_MB};

/// Memory grew by more than the leak threshold between two observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakEvent {
    pub test_name: String,
    pub initial_memory_kb: f64,
    pub final_memory_kb: f64,
    /// `final_memory_kb - initial_memory_kb`, always positive.
    pub leaked_memory_kb: f64,
    pub leaked_memory_mb: f64,
    pub timestamp: DateTime<Local>,
}

impl LeakEvent {
    pub fn new(test_name: &str, initial_memory_kb: f64, final_memory_kb: f64) -> Self {
        let leaked_memory_kb = final_memory_kb - initial_memory_kb;
        Self {
            test_name: test_name.to_string(),
            initial_memory_kb,
            final_memory_kb,
            leaked_memory_kb,
            leaked_memory_mb: leaked_memory_kb / KB_PER_MB,
            timestamp: Local::now(),
        }
    }

    pub fn initial_memory_mb(&self) -> f64 {
        self.initial_memory_kb / KB_PER_MB
    }

    pub fn final_memory_mb(&self) -> f64 {
        self.final_memory_kb / KB_PER_MB
    }
}

/// Absolute memory usage above the excessive-usage ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcessiveUsageEvent {
    pub test_name: String,
    pub memory_kb: f64,
    pub memory_gb: f64,
    pub threshold_gb: f64,
    pub timestamp: DateTime<Local>,
}

impl ExcessiveUsageEvent {
    pub fn new(test_name: &str, memory_kb: f64, threshold_gb: f64) -> Self {
        Self {
            test_name: test_name.to_string(),
            memory_kb,
            memory_gb: memory_kb / KB_PER_GB,
            threshold_gb,
            timestamp: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leak_event_derives_delta() {
        let leak = LeakEvent::new("t", 1024.0, 4096.0);
        assert_eq!(leak.leaked_memory_kb, 3072.0);
        assert_eq!(leak.leaked_memory_mb, 3.0);
        assert_eq!(leak.final_memory_mb(), 4.0);
    }

    #[test]
    fn excessive_event_converts_to_gb() {
        let issue = ExcessiveUsageEvent::new("t", 17.0 * KB_PER_GB, 16.0);
        assert_eq!(issue.memory_gb, 17.0);
    }
}
