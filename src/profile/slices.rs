//! Slice resolution: ordered partitioning of a table by a slicer column.

use std::collections::BTreeSet;

use arrow::array::BooleanArray;
use arrow::datatypes::DataType;
use tracing::warn;

use crate::error::{ProfileError, ProfileResult};
use crate::table::{float_values, int_values, string_values, temporal_values, Table};

use super::types::SliceKey;

/// Ordered iterator over (slice key, sub-table) pairs.
///
/// Without a slicer there is exactly one slice with the null key. With one,
/// the distinct slicer values become the keys, ascending; rows whose slicer
/// cell is null belong to no slice.
pub struct SliceIterator {
    entries: std::vec::IntoIter<(Option<SliceKey>, Table)>,
}

impl SliceIterator {
    /// Resolves the slices for `table`, validating the slicer eagerly.
    pub fn new(table: &Table, slicer: Option<&str>) -> ProfileResult<Self> {
        let entries = match slicer {
            None => vec![(None, table.clone())],
            Some(column) => sliced_entries(table, column)?,
        };
        Ok(Self {
            entries: entries.into_iter(),
        })
    }
}

impl Iterator for SliceIterator {
    type Item = (Option<SliceKey>, Table);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }
}

fn sliced_entries(table: &Table, column: &str) -> ProfileResult<Vec<(Option<SliceKey>, Table)>> {
    let row_keys = row_keys(table, column)?;

    let dropped = row_keys.iter().filter(|key| key.is_none()).count();
    if dropped > 0 {
        warn!(column, dropped, "rows with a null slicer value belong to no slice");
    }

    let keys: BTreeSet<SliceKey> = row_keys.iter().flatten().cloned().collect();
    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        let mask: BooleanArray = row_keys
            .iter()
            .map(|row_key| row_key.as_ref() == Some(&key))
            .collect::<Vec<bool>>()
            .into();
        entries.push((Some(key), table.filter(&mask)?));
    }
    Ok(entries)
}

/// Per-row slice keys, typed by the slicer column's dtype.
///
/// Unsupported dtypes are a configuration error raised here, not deferred to
/// comparison time.
fn row_keys(table: &Table, column: &str) -> ProfileResult<Vec<Option<SliceKey>>> {
    let array = table.column(column)?;
    let keys = match array.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => string_values(array)?
            .into_iter()
            .map(|value| value.map(SliceKey::Text))
            .collect(),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => int_values(array)?
            .into_iter()
            .map(|value| value.map(SliceKey::Long))
            .collect(),
        DataType::UInt64 | DataType::Float32 | DataType::Float64 => float_values(array)?
            .into_iter()
            .map(|value| value.map(SliceKey::Double))
            .collect(),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            temporal_values(array)?
                .into_iter()
                .map(|value| value.map(SliceKey::Timestamp))
                .collect()
        }
        other => {
            return Err(ProfileError::IncomparableSliceKey {
                column: column.to_string(),
                data_type: format!("{other}"),
            })
        }
    };
    Ok(keys)
}
