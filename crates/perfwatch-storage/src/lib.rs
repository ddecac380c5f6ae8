//! SQLite persistence for perfwatch.
//!
//! Reads llama-bench result rows from the `test` table and appends leak and
//! excessive-usage rows to `memory_leak_logs`. A connection is opened per
//! logical operation and dropped before the next one; no locking is added on
//! top of SQLite's own.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use store::{load_results, store_memory_events, try_load_results, FlushSummary};
