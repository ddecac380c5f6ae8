//! Leak and excessive-usage classification.

pub mod leak;
pub mod monitor;

pub use leak::{detect_leak, exceeds_usage_threshold, LeakThresholds};
pub use monitor::{FlushOutcome, MemoryMonitor, MonitorSnapshot, SignalPassSummary};
