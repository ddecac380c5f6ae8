//! Benchmark-output scanner for model-size, live-usage, and peak-usage reports.
//!
//! The three pattern families are matched independently and merged by their
//! position in the text, so signals come out in document order.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use perfwatch_core::errors::{ExtractError, PerfwatchErrorCode};
use perfwatch_core::types::{MemorySignal, SignalKind};
use regex::Regex;

static MODEL_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)model size:\s+(\d+\.?\d*)\s+(GiB|MiB|GB|MB)").unwrap()
});

static MEMORY_USAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)memory usage:\s+(\d+)\s+(MB|KB|GB)").unwrap());

static PEAK_MEMORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)peak memory:\s+(\d+\.?\d*)\s+(GB|MB)").unwrap());

/// Pattern families in tie-break order.
const KINDS: [SignalKind; 3] = [
    SignalKind::ModelSize,
    SignalKind::MemoryUsage,
    SignalKind::PeakMemory,
];

fn pattern(kind: SignalKind) -> &'static Regex {
    match kind {
        SignalKind::ModelSize => &MODEL_SIZE_RE,
        SignalKind::MemoryUsage => &MEMORY_USAGE_RE,
        SignalKind::PeakMemory => &PEAK_MEMORY_RE,
    }
}

/// Byte ranges of one pattern match.
#[derive(Debug, Clone, Copy)]
struct Hit {
    start: usize,
    end: usize,
    value: (usize, usize),
    unit: (usize, usize),
}

/// Lazy scan over a text, yielding signals in document order.
///
/// A clone resumes from the same position. Call [`scan_signals`] again to
/// start over.
#[derive(Debug, Clone)]
pub struct SignalScan<'t> {
    text: &'t str,
    cursors: [usize; 3],
    /// `None` until the next hit for that family has been searched for.
    lookahead: [Option<Option<Hit>>; 3],
}

/// Start a scan over `text`.
pub fn scan_signals(text: &str) -> SignalScan<'_> {
    SignalScan {
        text,
        cursors: [0; 3],
        lookahead: [None; 3],
    }
}

impl SignalScan<'_> {
    fn find_hit(&self, slot: usize) -> Option<Hit> {
        let caps = pattern(KINDS[slot]).captures_at(self.text, self.cursors[slot])?;
        let whole = caps.get(0)?;
        let value = caps.get(1)?;
        let unit = caps.get(2)?;
        Some(Hit {
            start: whole.start(),
            end: whole.end(),
            value: (value.start(), value.end()),
            unit: (unit.start(), unit.end()),
        })
    }
}

impl Iterator for SignalScan<'_> {
    type Item = MemorySignal;

    fn next(&mut self) -> Option<MemorySignal> {
        loop {
            for slot in 0..KINDS.len() {
                if self.lookahead[slot].is_none() {
                    self.lookahead[slot] = Some(self.find_hit(slot));
                }
            }

            let (slot, hit) = self
                .lookahead
                .iter()
                .enumerate()
                .filter_map(|(slot, hit)| (*hit).flatten().map(|h| (slot, h)))
                .min_by_key(|(slot, hit)| (hit.start, *slot))?;

            self.cursors[slot] = hit.end;
            self.lookahead[slot] = None;

            let literal = &self.text[hit.value.0..hit.value.1];
            let unit = &self.text[hit.unit.0..hit.unit.1];
            match MemorySignal::parse(KINDS[slot], literal, unit) {
                Ok(signal) => return Some(signal),
                Err(e) => {
                    // Only this record is dropped; the scan continues.
                    tracing::debug!(offset = hit.start, error = %e.coded_string(), "dropping memory signal");
                }
            }
        }
    }
}

/// Benchmark output held in memory so it can be scanned any number of times.
#[derive(Debug, Clone, Default)]
pub struct SignalDocument {
    source: Option<PathBuf>,
    text: String,
}

impl SignalDocument {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: None,
            text: text.into(),
        }
    }

    /// Read a benchmark output file.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::InputNotFound {
                path: path.display().to_string(),
            });
        }
        let bytes = std::fs::read(path).map_err(|e| ExtractError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Read a benchmark output file; a missing or unreadable file is an
    /// empty document plus a warning.
    pub fn open_or_empty(path: &Path) -> Self {
        match Self::open(path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "benchmark output unavailable");
                Self {
                    source: Some(path.to_path_buf()),
                    text: String::new(),
                }
            }
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn signals(&self) -> SignalScan<'_> {
        scan_signals(&self.text)
    }
}
