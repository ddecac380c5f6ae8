//! Memory observations parsed from benchmark output and test logs.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::{KB_PER_GB, KB_PER_MB};
use crate::errors::ExtractError;

/// Which textual report a signal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// `model size: 1.0 GiB`
    ModelSize,
    /// `memory usage: 2 MB`
    MemoryUsage,
    /// `peak memory: 0.5 GB`
    PeakMemory,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModelSize => "model_size",
            Self::MemoryUsage => "memory_usage",
            Self::PeakMemory => "peak_memory",
        }
    }

    /// Live and peak usage reports; model size is a static footprint.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MemoryUsage | Self::PeakMemory)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit tokens accepted by the memory patterns.
///
/// Binary and decimal prefixes normalize with the same 1024-based factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryUnit {
    GiB,
    GB,
    MiB,
    MB,
    KB,
}

impl MemoryUnit {
    /// Case-insensitive token lookup. Folds the same Unicode case variants
    /// the scanner's `(?i)` patterns accept, e.g. the Kelvin sign for `K`.
    pub fn parse(token: &str) -> Result<Self, ExtractError> {
        match token.to_lowercase().as_str() {
            "gib" => Ok(Self::GiB),
            "gb" => Ok(Self::GB),
            "mib" => Ok(Self::MiB),
            "mb" => Ok(Self::MB),
            "kb" => Ok(Self::KB),
            _ => Err(ExtractError::UnknownUnit(token.to_string())),
        }
    }

    /// Multiplier that converts a magnitude in this unit to KB.
    pub fn kb_factor(&self) -> f64 {
        match self {
            Self::GiB | Self::GB => KB_PER_GB,
            Self::MiB | Self::MB => KB_PER_MB,
            Self::KB => 1.0,
        }
    }

    pub fn to_kb(&self, magnitude: f64) -> f64 {
        magnitude * self.kb_factor()
    }
}

/// Parse a magnitude literal and unit token into KB.
///
/// All number parsing and unit normalization for memory signals goes through
/// here.
pub fn normalize_to_kb(literal: &str, unit_token: &str) -> Result<f64, ExtractError> {
    let unit = MemoryUnit::parse(unit_token)?;
    let magnitude: f64 = literal
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| ExtractError::MalformedMagnitude {
            literal: literal.to_string(),
            message: e.to_string(),
        })?;
    if !magnitude.is_finite() {
        return Err(ExtractError::MalformedMagnitude {
            literal: literal.to_string(),
            message: "magnitude is not finite".to_string(),
        });
    }
    Ok(unit.to_kb(magnitude))
}

/// One parsed memory observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySignal {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    /// Magnitude normalized to KB.
    pub value_kb: f64,
    /// Magnitude exactly as it appeared in the source.
    pub original_value: String,
    /// Unit token exactly as it appeared in the source.
    pub unit: String,
}

impl MemorySignal {
    pub fn parse(kind: SignalKind, literal: &str, unit_token: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            kind,
            value_kb: normalize_to_kb(literal, unit_token)?,
            original_value: literal.to_string(),
            unit: unit_token.to_string(),
        })
    }
}

/// Codes at or above this value denote a prepare/compute failure.
pub const FIRST_FAILURE_CODE: i64 = 2;

/// Code reserved for lines that only matched the generic issue pattern.
pub const ISSUE_SENTINEL_CODE: i64 = -1;

/// Memory status reported by the inference runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryStatus {
    Success,
    NoUpdate,
    FailedPrepare,
    FailedCompute,
    /// A numeric code with no known meaning.
    Unknown(i64),
    /// Synthetic status for a generic leak/failure/error line.
    IssueDetected,
}

impl MemoryStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::NoUpdate,
            2 => Self::FailedPrepare,
            3 => Self::FailedCompute,
            ISSUE_SENTINEL_CODE => Self::IssueDetected,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Success => 0,
            Self::NoUpdate => 1,
            Self::FailedPrepare => 2,
            Self::FailedCompute => 3,
            Self::Unknown(code) => *code,
            Self::IssueDetected => ISSUE_SENTINEL_CODE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "LLAMA_MEMORY_STATUS_SUCCESS",
            Self::NoUpdate => "LLAMA_MEMORY_STATUS_NO_UPDATE",
            Self::FailedPrepare => "LLAMA_MEMORY_STATUS_FAILED_PREPARE",
            Self::FailedCompute => "LLAMA_MEMORY_STATUS_FAILED_COMPUTE",
            Self::Unknown(_) => "UNKNOWN",
            Self::IssueDetected => "MEMORY_ISSUE_DETECTED",
        }
    }
}

impl fmt::Display for MemoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One status record parsed from a test log line.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusObservation {
    /// 1-based line number.
    pub line_number: usize,
    pub status: MemoryStatus,
    /// Line text with surrounding whitespace removed.
    pub line: String,
    pub is_failure: bool,
}

impl StatusObservation {
    /// Record for a line carrying an explicit status code.
    pub fn from_code(line_number: usize, code: i64, line: &str) -> Self {
        Self {
            line_number,
            status: MemoryStatus::from_code(code),
            line: line.trim().to_string(),
            is_failure: code >= FIRST_FAILURE_CODE,
        }
    }

    /// Synthetic record for a line matching the generic issue pattern.
    pub fn issue(line_number: usize, line: &str) -> Self {
        Self {
            line_number,
            status: MemoryStatus::IssueDetected,
            line: line.trim().to_string(),
            is_failure: true,
        }
    }

    pub fn status_code(&self) -> i64 {
        self.status.code()
    }
}

impl Serialize for StatusObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("StatusObservation", 5)?;
        s.serialize_field("line_number", &self.line_number)?;
        s.serialize_field("status_code", &self.status.code())?;
        s.serialize_field("status_name", self.status.name())?;
        s.serialize_field("line", &self.line)?;
        s.serialize_field("is_failure", &self.is_failure)?;
        s.end()
    }
}
