//! Observability for perfwatch.
//! `tracing` crate with `EnvFilter`, overridable through `PERFWATCH_LOG`.

pub mod setup;

pub use setup::init_tracing;
