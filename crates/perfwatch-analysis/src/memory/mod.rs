//! Memory signal extraction from benchmark output and test logs.

pub mod extractor;
pub mod status;

pub use extractor::{scan_signals, SignalDocument, SignalScan};
pub use status::{parse_status_line, read_status_log, scan_status_lines};
