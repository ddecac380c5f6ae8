//! BenchmarkRecord: one llama-bench invocation as loaded from the `test` table.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A single column value. Mirrors SQLite's dynamic typing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value. Text and null have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Real(r) => Some(*r),
            Self::Null | Self::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// False for null, zero, and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Int(i) => *i != 0,
            Self::Real(r) => *r != 0.0,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

/// Integers and reals compare numerically; other cross-type pairs never match.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Int(a), Self::Real(b)) | (Self::Real(b), Self::Int(a)) => (*a as f64) == *b,
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

/// Benchmark parameters that decide whether two runs are the same benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyProperty {
    ModelType,
    NBatch,
    NUbatch,
    NThreads,
    NGpuLayers,
    Backends,
    NPrompt,
    NGen,
    FlashAttn,
}

impl KeyProperty {
    /// Column name in the llama-bench `test` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::ModelType => "model_type",
            Self::NBatch => "n_batch",
            Self::NUbatch => "n_ubatch",
            Self::NThreads => "n_threads",
            Self::NGpuLayers => "n_gpu_layers",
            Self::Backends => "backends",
            Self::NPrompt => "n_prompt",
            Self::NGen => "n_gen",
            Self::FlashAttn => "flash_attn",
        }
    }

    pub fn all() -> &'static [KeyProperty] {
        &[
            Self::ModelType,
            Self::NBatch,
            Self::NUbatch,
            Self::NThreads,
            Self::NGpuLayers,
            Self::Backends,
            Self::NPrompt,
            Self::NGen,
            Self::FlashAttn,
        ]
    }
}

impl fmt::Display for KeyProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One benchmark invocation: key properties, metrics, and provenance.
///
/// Columns are kept in the order the store returned them. A column that the
/// source table lacks is absent here, which is different from a null value.
/// Records are built once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkRecord {
    columns: Vec<(String, FieldValue)>,
}

impl BenchmarkRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs. Later duplicates win.
    pub fn from_columns<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        columns
            .into_iter()
            .fold(Self::new(), |record, (name, value)| record.with(name, value))
    }

    /// Builder-style column setter used while constructing a record.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((name, value)),
        }
        self
    }

    /// Raw column lookup. `None` means the column is absent.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn key_property(&self, key: KeyProperty) -> Option<&FieldValue> {
        self.get(key.column())
    }

    /// Numeric metric value. Absent, null, or non-numeric columns yield `None`.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    /// Average latency in nanoseconds.
    pub fn avg_ns(&self) -> Option<f64> {
        self.metric("avg_ns")
    }

    /// Average throughput in tokens per second.
    pub fn avg_ts(&self) -> Option<f64> {
        self.metric("avg_ts")
    }

    /// Model size in bytes.
    pub fn model_size(&self) -> Option<f64> {
        self.metric("model_size")
    }

    pub fn stddev_ns(&self) -> Option<f64> {
        self.metric("stddev_ns")
    }

    pub fn stddev_ts(&self) -> Option<f64> {
        self.metric("stddev_ts")
    }

    pub fn model_type(&self) -> Option<&str> {
        self.get("model_type").and_then(FieldValue::as_str)
    }

    pub fn build_commit(&self) -> Option<&str> {
        self.get("build_commit").and_then(FieldValue::as_str)
    }

    pub fn build_number(&self) -> Option<i64> {
        self.get("build_number").and_then(FieldValue::as_i64)
    }

    pub fn test_time(&self) -> Option<&str> {
        self.get("test_time").and_then(FieldValue::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for BenchmarkRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
