//! In-memory tables backed by Arrow arrays.
//!
//! A [`Table`] is an ordered collection of named, typed, nullable columns.
//! Column access, sub-table filtering, and scalar extraction all go through
//! this module so the rest of the pipeline never touches raw array downcasts.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray,
    TimestampMicrosecondArray,
};
use arrow::compute;
use arrow::datatypes::{DataType, TimeUnit};
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDateTime};

use crate::error::{ProfileError, ProfileResult};

/// An immutable table of named Arrow columns.
///
/// Columns keep their insertion order, which drives the column iteration
/// order during profiling.
#[derive(Debug, Clone)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<ArrayRef>,
    num_rows: usize,
}

impl Table {
    /// Builds a table from named columns.
    ///
    /// Fails when column lengths differ or a name appears twice.
    pub fn try_new<S: Into<String>>(columns: Vec<(S, ArrayRef)>) -> ProfileResult<Self> {
        let mut names = Vec::with_capacity(columns.len());
        let mut arrays = Vec::with_capacity(columns.len());
        let mut num_rows = 0usize;

        for (idx, (name, array)) in columns.into_iter().enumerate() {
            let name = name.into();
            if names.contains(&name) {
                return Err(ProfileError::invalid_table(format!(
                    "duplicate column name '{name}'"
                )));
            }
            if idx == 0 {
                num_rows = array.len();
            } else if array.len() != num_rows {
                return Err(ProfileError::invalid_table(format!(
                    "column '{name}' has {} rows, expected {num_rows}",
                    array.len()
                )));
            }
            names.push(name);
            arrays.push(array);
        }

        Ok(Self {
            names,
            columns: arrays,
            num_rows,
        })
    }

    /// Returns the column names in table order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns the column arrays in table order.
    pub fn columns(&self) -> &[ArrayRef] {
        &self.columns
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> ProfileResult<&ArrayRef> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| ProfileError::ColumnNotFound(name.to_string()))
    }

    /// Checks whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the sub-table of rows selected by the mask.
    pub(crate) fn filter(&self, mask: &BooleanArray) -> ProfileResult<Table> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            columns.push(compute::filter(column.as_ref(), mask)?);
        }
        Ok(Table {
            names: self.names.clone(),
            columns,
            num_rows: mask.true_count(),
        })
    }
}

fn downcast_failure(target: &str) -> ProfileError {
    ProfileError::invalid_table(format!("cast did not produce a {target} array"))
}

/// Extracts a column as nullable floats via a safe cast to Float64.
///
/// Unparseable cells (e.g. free text under a numeric override) become nulls,
/// matching Arrow's safe cast semantics.
pub(crate) fn float_values(column: &ArrayRef) -> ProfileResult<Vec<Option<f64>>> {
    let cast = compute::cast(column, &DataType::Float64)?;
    let floats = cast
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| downcast_failure("Float64"))?;
    Ok((0..floats.len())
        .map(|i| {
            if floats.is_null(i) {
                None
            } else {
                Some(floats.value(i))
            }
        })
        .collect())
}

/// Extracts a column as nullable integers via a safe cast to Int64.
pub(crate) fn int_values(column: &ArrayRef) -> ProfileResult<Vec<Option<i64>>> {
    let cast = compute::cast(column, &DataType::Int64)?;
    let ints = cast
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| downcast_failure("Int64"))?;
    Ok((0..ints.len())
        .map(|i| {
            if ints.is_null(i) {
                None
            } else {
                Some(ints.value(i))
            }
        })
        .collect())
}

/// Extracts a column as nullable strings via a safe cast to Utf8.
pub(crate) fn string_values(column: &ArrayRef) -> ProfileResult<Vec<Option<String>>> {
    let cast = compute::cast(column, &DataType::Utf8)?;
    let strings = cast
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| downcast_failure("Utf8"))?;
    Ok((0..strings.len())
        .map(|i| {
            if strings.is_null(i) {
                None
            } else {
                Some(strings.value(i).to_string())
            }
        })
        .collect())
}

/// Extracts a column as nullable booleans via a safe cast to Boolean.
pub(crate) fn bool_values(column: &ArrayRef) -> ProfileResult<Vec<Option<bool>>> {
    let cast = compute::cast(column, &DataType::Boolean)?;
    let bools = cast
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| downcast_failure("Boolean"))?;
    Ok((0..bools.len())
        .map(|i| {
            if bools.is_null(i) {
                None
            } else {
                Some(bools.value(i))
            }
        })
        .collect())
}

/// Extracts a column as nullable timestamps via a safe cast to
/// microsecond-precision timestamps.
pub(crate) fn temporal_values(column: &ArrayRef) -> ProfileResult<Vec<Option<NaiveDateTime>>> {
    let cast = compute::cast(column, &DataType::Timestamp(TimeUnit::Microsecond, None))?;
    let timestamps = cast
        .as_any()
        .downcast_ref::<TimestampMicrosecondArray>()
        .ok_or_else(|| downcast_failure("TimestampMicrosecond"))?;
    Ok((0..timestamps.len())
        .map(|i| {
            if timestamps.is_null(i) {
                None
            } else {
                DateTime::from_timestamp_micros(timestamps.value(i)).map(|dt| dt.naive_utc())
            }
        })
        .collect())
}

/// Renders one cell as a string, or `None` for nulls.
///
/// Works for any Arrow type, which makes it the fallback for generic columns
/// and the basis for row hashing.
pub(crate) fn display_value(column: &ArrayRef, row: usize) -> ProfileResult<Option<String>> {
    if column.is_null(row) {
        return Ok(None);
    }
    Ok(Some(array_value_to_string(column.as_ref(), row)?))
}

/// Convenience constructor for a single-column array reference.
pub fn array_ref<A: Array + 'static>(array: A) -> ArrayRef {
    Arc::new(array)
}
