//! Core types, errors, configuration, and tracing for perfwatch.
//!
//! perfwatch watches a benchmark suite from CI: it extracts memory signals from
//! benchmark output, flags leaks and excessive usage, and compares two
//! generations of benchmark results for directional regressions.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;
