//! Measurement rows, slice keys, and the long-format measurement table.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::inspectors::Category;
use crate::measure::MeasureValue;

/// A totally ordered, hashable partition key derived from a slicer column.
///
/// Keys coming from one column always share a variant; the cross-variant
/// ordering exists only to keep the total order well defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SliceKey {
    Long(i64),
    Double(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl SliceKey {
    fn rank(&self) -> u8 {
        match self {
            SliceKey::Long(_) => 0,
            SliceKey::Double(_) => 1,
            SliceKey::Text(_) => 2,
            SliceKey::Timestamp(_) => 3,
        }
    }
}

impl Ord for SliceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SliceKey::Long(a), SliceKey::Long(b)) => a.cmp(b),
            (SliceKey::Double(a), SliceKey::Double(b)) => a.total_cmp(b),
            (SliceKey::Text(a), SliceKey::Text(b)) => a.cmp(b),
            (SliceKey::Timestamp(a), SliceKey::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SliceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SliceKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SliceKey {}

impl Hash for SliceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            SliceKey::Long(v) => v.hash(state),
            SliceKey::Double(v) => v.to_bits().hash(state),
            SliceKey::Text(v) => v.hash(state),
            SliceKey::Timestamp(v) => v.hash(state),
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceKey::Long(v) => write!(f, "{v}"),
            SliceKey::Double(v) => write!(f, "{v}"),
            SliceKey::Text(v) => write!(f, "{v}"),
            SliceKey::Timestamp(v) => write!(f, "{v}"),
        }
    }
}

/// One measurement: a (category, column, slice, measure) cell plus the value
/// and, after lag construction, up to K historical values from the same
/// (column, measure) series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub inspector: Category,
    pub column: String,
    pub slice: Option<SliceKey>,
    pub measure: String,
    pub value: MeasureValue,
    /// `lags[d - 1]` is the series value d slices earlier, when it exists.
    pub lags: Vec<Option<MeasureValue>>,
}

impl MeasurementRow {
    /// The lag value at 1-based depth `depth`, if populated.
    pub fn lag(&self, depth: usize) -> Option<&MeasureValue> {
        if depth == 0 {
            return None;
        }
        self.lags.get(depth - 1).and_then(|lag| lag.as_ref())
    }
}

/// Long-format measurement table, canonically sorted by
/// (inspector, column, measure, slice).
///
/// The sort is what makes positional offsets meaningful: rows of one
/// (column, measure) series are contiguous and ascending by slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementTable {
    rows: Vec<MeasurementRow>,
    lag_depth: usize,
}

impl MeasurementTable {
    pub(crate) fn new(rows: Vec<MeasurementRow>) -> Self {
        Self { rows, lag_depth: 0 }
    }

    /// The measurement rows in canonical order.
    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    /// Number of lag columns carried by each row (0 before lag construction).
    pub fn lag_depth(&self) -> usize {
        self.lag_depth
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [MeasurementRow] {
        &mut self.rows
    }

    pub(crate) fn set_lag_depth(&mut self, depth: usize) {
        self.lag_depth = depth;
    }

    /// Applies the canonical (inspector, column, measure, slice) sort.
    pub(crate) fn canonical_sort(&mut self) {
        self.rows.sort_by(|a, b| {
            a.inspector
                .cmp(&b.inspector)
                .then_with(|| a.column.cmp(&b.column))
                .then_with(|| a.measure.cmp(&b.measure))
                .then_with(|| a.slice.cmp(&b.slice))
        });
    }

    /// Serializes the table to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(column: &str, measure: &str, slice: i64) -> MeasurementRow {
        MeasurementRow {
            inspector: Category::Number,
            column: column.to_string(),
            slice: Some(SliceKey::Long(slice)),
            measure: measure.to_string(),
            value: MeasureValue::Long(slice),
            lags: Vec::new(),
        }
    }

    #[test]
    fn canonical_sort_orders_series_contiguously() {
        let mut table = MeasurementTable::new(vec![
            row("b", "mean_value", 2),
            row("a", "mean_value", 2),
            row("a", "mean_value", 1),
            row("a", "max_value", 1),
        ]);
        table.canonical_sort();
        let keys: Vec<(String, String, Option<SliceKey>)> = table
            .rows()
            .iter()
            .map(|r| (r.column.clone(), r.measure.clone(), r.slice.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a".into(), "max_value".into(), Some(SliceKey::Long(1))),
                ("a".into(), "mean_value".into(), Some(SliceKey::Long(1))),
                ("a".into(), "mean_value".into(), Some(SliceKey::Long(2))),
                ("b".into(), "mean_value".into(), Some(SliceKey::Long(2))),
            ]
        );
    }

    #[test]
    fn slice_keys_order_ascending() {
        let mut keys = vec![
            SliceKey::Text("c".into()),
            SliceKey::Text("a".into()),
            SliceKey::Text("b".into()),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SliceKey::Text("a".into()),
                SliceKey::Text("b".into()),
                SliceKey::Text("c".into()),
            ]
        );
    }

    #[test]
    fn double_keys_are_totally_ordered() {
        let mut keys = vec![SliceKey::Double(2.5), SliceKey::Double(-1.0)];
        keys.sort();
        assert_eq!(keys[0], SliceKey::Double(-1.0));
    }
}
