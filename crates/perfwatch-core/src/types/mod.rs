//! Value types shared across the pipeline.

pub mod events;
pub mod memory;
pub mod record;

pub use events::{ExcessiveUsageEvent, LeakEvent};
pub use memory::{MemorySignal, MemoryStatus, MemoryUnit, SignalKind, StatusObservation};
pub use record::{BenchmarkRecord, FieldValue, KeyProperty};
