//! Measure values produced by column inspectors.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single statistic produced by an inspector for one column.
///
/// Covers the scalar shapes the inspectors emit plus nested maps for
/// distribution-style measures such as value counts and precision variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MeasureValue {
    /// The measure could not be computed (e.g. stdev of a single value).
    Null,

    /// An integer measure (e.g. row_count, distinct_count).
    Long(i64),

    /// A floating-point measure (e.g. null_ratio, mean_value).
    Double(f64),

    /// A boolean measure.
    Boolean(bool),

    /// A string measure.
    Text(String),

    /// A temporal measure (e.g. min_value/max_value of a datetime column).
    Timestamp(NaiveDateTime),

    /// A nested measure keyed by rendered value (e.g. top_five_value_counts).
    Map(BTreeMap<String, MeasureValue>),
}

impl MeasureValue {
    /// Returns true when the measure carries no value.
    pub fn is_null(&self) -> bool {
        matches!(self, MeasureValue::Null)
    }

    /// Checks whether the value is numeric (Long or Double).
    pub fn is_numeric(&self) -> bool {
        matches!(self, MeasureValue::Long(_) | MeasureValue::Double(_))
    }

    /// Projects the value onto the real line for rule evaluation.
    ///
    /// Timestamps map to epoch microseconds so that ordering comparisons
    /// between temporal measures behave like numeric comparisons. Text,
    /// boolean, and nested values have no numeric projection.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MeasureValue::Long(v) => Some(*v as f64),
            MeasureValue::Double(v) => Some(*v),
            MeasureValue::Timestamp(ts) => Some(ts.and_utc().timestamp_micros() as f64),
            _ => None,
        }
    }

    /// Attempts to get the value as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MeasureValue::Long(v) => Some(*v),
            MeasureValue::Double(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Returns a human-readable rendering of the value.
    pub fn to_string_pretty(&self) -> String {
        match self {
            MeasureValue::Null => "null".to_string(),
            MeasureValue::Long(v) => v.to_string(),
            MeasureValue::Double(v) => {
                if v.fract() == 0.0 {
                    format!("{v:.0}")
                } else {
                    format!("{v:.4}")
                }
            }
            MeasureValue::Boolean(b) => b.to_string(),
            MeasureValue::Text(s) => s.clone(),
            MeasureValue::Timestamp(ts) => ts.to_string(),
            MeasureValue::Map(m) => format!("Map({} entries)", m.len()),
        }
    }
}

impl fmt::Display for MeasureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_pretty())
    }
}

impl From<f64> for MeasureValue {
    fn from(value: f64) -> Self {
        MeasureValue::Double(value)
    }
}

impl From<i64> for MeasureValue {
    fn from(value: i64) -> Self {
        MeasureValue::Long(value)
    }
}

impl From<bool> for MeasureValue {
    fn from(value: bool) -> Self {
        MeasureValue::Boolean(value)
    }
}

impl From<&str> for MeasureValue {
    fn from(value: &str) -> Self {
        MeasureValue::Text(value.to_string())
    }
}

impl From<Option<f64>> for MeasureValue {
    fn from(value: Option<f64>) -> Self {
        value.map(MeasureValue::Double).unwrap_or(MeasureValue::Null)
    }
}
