//! Core measures shared by every category, and the generic fallback inspector.

use std::collections::HashSet;

use arrow::array::{Array, ArrayRef};

use crate::error::ProfileResult;
use crate::measure::MeasureValue;
use crate::table::display_value;

use super::{Category, Inspector};

/// Measures every category emits: `row_count`, `distinct_count`, `null_ratio`.
pub(crate) fn core_inspect(column: &ArrayRef) -> ProfileResult<Vec<(&'static str, MeasureValue)>> {
    let rows = column.len();
    let nulls = column.null_count();
    Ok(vec![
        ("row_count", MeasureValue::Long(rows as i64)),
        ("distinct_count", MeasureValue::Long(distinct_count(column)?)),
        ("null_ratio", MeasureValue::Double(ratio(nulls, rows))),
    ])
}

/// Distinct values in the column; nulls collectively count as one value.
pub(crate) fn distinct_count(column: &ArrayRef) -> ProfileResult<i64> {
    let mut seen = HashSet::new();
    for row in 0..column.len() {
        if let Some(rendered) = display_value(column, row)? {
            seen.insert(rendered);
        }
    }
    let null_bump = usize::from(column.null_count() > 0);
    Ok((seen.len() + null_bump) as i64)
}

/// Proportion of `count` over `rows`; 0.0 for an empty column.
pub(crate) fn ratio(count: usize, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        count as f64 / rows as f64
    }
}

/// Wraps an optional float, mapping absence to [`MeasureValue::Null`].
pub(crate) fn opt_double(value: Option<f64>) -> MeasureValue {
    value.map(MeasureValue::Double).unwrap_or(MeasureValue::Null)
}

/// Fallback inspector for columns outside the typed categories.
#[derive(Debug, Default)]
pub struct GenericInspector;

impl Inspector for GenericInspector {
    fn category(&self) -> Category {
        Category::Generic
    }

    fn inspect(&self, column: &ArrayRef) -> ProfileResult<Vec<(&'static str, MeasureValue)>> {
        core_inspect(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::array_ref;
    use arrow::array::Int64Array;

    #[test]
    fn core_measures() {
        let column = array_ref(Int64Array::from(vec![Some(1), Some(1), None, Some(3)]));
        let measures = core_inspect(&column).unwrap();
        assert_eq!(measures[0], ("row_count", MeasureValue::Long(4)));
        // two distinct non-null values plus the null bucket
        assert_eq!(measures[1], ("distinct_count", MeasureValue::Long(3)));
        assert_eq!(measures[2], ("null_ratio", MeasureValue::Double(0.25)));
    }

    #[test]
    fn empty_column_has_zero_ratio() {
        let column = array_ref(Int64Array::from(Vec::<i64>::new()));
        let measures = core_inspect(&column).unwrap();
        assert_eq!(measures[2], ("null_ratio", MeasureValue::Double(0.0)));
    }
}
