//! Inspector for boolean columns.

use arrow::array::ArrayRef;

use crate::error::ProfileResult;
use crate::measure::MeasureValue;
use crate::table::bool_values;

use super::base::{core_inspect, ratio};
use super::{Category, Inspector};

/// Emits the core measures plus `true_ratio` and `false_ratio`.
#[derive(Debug, Default)]
pub struct BooleanInspector;

impl Inspector for BooleanInspector {
    fn category(&self) -> Category {
        Category::Boolean
    }

    fn inspect(&self, column: &ArrayRef) -> ProfileResult<Vec<(&'static str, MeasureValue)>> {
        let mut measures = core_inspect(column)?;
        let values = bool_values(column)?;
        let rows = values.len();
        let trues = values.iter().filter(|v| **v == Some(true)).count();
        let falses = values.iter().filter(|v| **v == Some(false)).count();
        measures.push(("true_ratio", MeasureValue::Double(ratio(trues, rows))));
        measures.push(("false_ratio", MeasureValue::Double(ratio(falses, rows))));
        Ok(measures)
    }
}
