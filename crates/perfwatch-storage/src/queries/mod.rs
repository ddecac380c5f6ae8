//! Query modules, one per table.

pub mod benchmarks;
pub mod memory_leak_logs;
