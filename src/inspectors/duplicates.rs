//! Table-level duplicate-row detection via row hashing.

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::ProfileResult;
use crate::table::{display_value, Table};

/// Number of rows that repeat an earlier row exactly.
pub fn duplicate_row_count(table: &Table) -> ProfileResult<usize> {
    let mut seen = HashSet::new();
    for row in 0..table.num_rows() {
        seen.insert(row_digest(table, row)?);
    }
    let duplicates = table.num_rows() - seen.len();
    debug!(rows = table.num_rows(), duplicates, "hashed table rows");
    Ok(duplicates)
}

/// Whether any two rows of the table are exact duplicates.
pub fn has_duplicate_rows(table: &Table) -> ProfileResult<bool> {
    Ok(duplicate_row_count(table)? > 0)
}

fn row_digest(table: &Table, row: usize) -> ProfileResult<String> {
    let mut hasher = Sha256::new();
    for column in table.columns() {
        // Sentinel bytes keep ("ab", "c") distinct from ("a", "bc") and mark
        // nulls explicitly.
        match display_value(column, row)? {
            Some(rendered) => {
                hasher.update(rendered.as_bytes());
                hasher.update([0xff]);
            }
            None => hasher.update([0x00]),
        }
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::array_ref;
    use arrow::array::{Int64Array, StringArray};

    #[test]
    fn detects_exact_duplicates() {
        let table = Table::try_new(vec![
            ("id", array_ref(Int64Array::from(vec![1, 2, 1]))),
            ("name", array_ref(StringArray::from(vec!["a", "b", "a"]))),
        ])
        .unwrap();
        assert_eq!(duplicate_row_count(&table).unwrap(), 1);
        assert!(has_duplicate_rows(&table).unwrap());
    }

    #[test]
    fn distinct_rows_are_clean() {
        let table = Table::try_new(vec![
            ("id", array_ref(Int64Array::from(vec![1, 2, 1]))),
            ("name", array_ref(StringArray::from(vec!["a", "b", "c"]))),
        ])
        .unwrap();
        assert!(!has_duplicate_rows(&table).unwrap());
    }

    #[test]
    fn nulls_compare_equal_across_rows() {
        let table = Table::try_new(vec![(
            "name",
            array_ref(StringArray::from(vec![None::<&str>, None])),
        )])
        .unwrap();
        assert_eq!(duplicate_row_count(&table).unwrap(), 1);
    }
}
