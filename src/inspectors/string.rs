//! Inspector for string columns.

use std::collections::HashSet;

use arrow::array::ArrayRef;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ProfileResult;
use crate::measure::MeasureValue;
use crate::table::string_values;

use super::base::{core_inspect, ratio};
use super::{Category, Inspector};

static SPECIAL_CHARACTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9 ]").expect("valid special-character pattern"));

/// Emits the core measures plus hygiene ratios for a string column:
/// emptiness, near-duplicate redundancy, special characters, and whitespace
/// requiring a trim.
#[derive(Debug, Default)]
pub struct StringInspector;

impl Inspector for StringInspector {
    fn category(&self) -> Category {
        Category::String
    }

    fn inspect(&self, column: &ArrayRef) -> ProfileResult<Vec<(&'static str, MeasureValue)>> {
        let mut measures = core_inspect(column)?;
        let values = string_values(column)?;
        let rows = values.len();
        let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();

        let empty = present.iter().filter(|s| s.is_empty()).count();
        let special = present
            .iter()
            .filter(|s| SPECIAL_CHARACTERS.is_match(s))
            .count();
        let trim_required = present.iter().filter(|s| s.trim() != **s).count();

        let distinct: HashSet<&str> = present.iter().copied().collect();
        let strict_distinct: HashSet<String> = present
            .iter()
            .map(|s| s.trim().to_lowercase())
            .collect();
        // Case- or whitespace-only variants collapse under normalization.
        let redundant = strict_distinct.len() < distinct.len();

        measures.push(("empty_ratio", MeasureValue::Double(ratio(empty, rows))));
        measures.push((
            "strict_distinct_count",
            MeasureValue::Long(strict_distinct.len() as i64),
        ));
        measures.push(("redundancy_indicator", MeasureValue::Long(i64::from(redundant))));
        measures.push((
            "special_character_ratio",
            MeasureValue::Double(ratio(special, rows)),
        ));
        measures.push((
            "trim_required_ratio",
            MeasureValue::Double(ratio(trim_required, rows)),
        ));
        Ok(measures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::array_ref;
    use arrow::array::StringArray;

    fn lookup(measures: &[(&'static str, MeasureValue)], name: &str) -> MeasureValue {
        measures
            .iter()
            .find(|(m, _)| *m == name)
            .map(|(_, v)| v.clone())
            .unwrap()
    }

    #[test]
    fn hygiene_ratios() {
        let column = array_ref(StringArray::from(vec![
            Some("alpha"),
            Some("Alpha "),
            Some(""),
            Some("beta!"),
            None,
        ]));
        let measures = StringInspector.inspect(&column).unwrap();
        assert_eq!(lookup(&measures, "empty_ratio"), MeasureValue::Double(0.2));
        assert_eq!(
            lookup(&measures, "trim_required_ratio"),
            MeasureValue::Double(0.2)
        );
        assert_eq!(
            lookup(&measures, "special_character_ratio"),
            MeasureValue::Double(0.2)
        );
        // "alpha" and "Alpha " normalize to the same value
        assert_eq!(
            lookup(&measures, "redundancy_indicator"),
            MeasureValue::Long(1)
        );
        assert_eq!(
            lookup(&measures, "strict_distinct_count"),
            MeasureValue::Long(3)
        );
    }

    #[test]
    fn clean_column_has_no_redundancy() {
        let column = array_ref(StringArray::from(vec!["a", "b", "c"]));
        let measures = StringInspector.inspect(&column).unwrap();
        assert_eq!(
            lookup(&measures, "redundancy_indicator"),
            MeasureValue::Long(0)
        );
        assert_eq!(lookup(&measures, "empty_ratio"), MeasureValue::Double(0.0));
    }
}
