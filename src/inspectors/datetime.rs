//! Inspector for temporal columns.

use std::collections::BTreeMap;

use arrow::array::ArrayRef;
use chrono::{NaiveDateTime, Timelike};

use crate::error::ProfileResult;
use crate::measure::MeasureValue;
use crate::table::temporal_values;

use super::base::{core_inspect, ratio};
use super::{Category, Inspector};

/// Emits the core measures plus temporal extremes and a precision-variance
/// distribution describing how finely timestamps are populated.
#[derive(Debug, Default)]
pub struct DatetimeInspector;

impl Inspector for DatetimeInspector {
    fn category(&self) -> Category {
        Category::Datetime
    }

    fn inspect(&self, column: &ArrayRef) -> ProfileResult<Vec<(&'static str, MeasureValue)>> {
        let mut measures = core_inspect(column)?;
        let values = temporal_values(column)?;
        let present: Vec<NaiveDateTime> = values.into_iter().flatten().collect();

        measures.push(("min_value", opt_timestamp(present.iter().min().copied())));
        measures.push(("max_value", opt_timestamp(present.iter().max().copied())));
        measures.push(("precision_variance", precision_variance(&present)));
        Ok(measures)
    }
}

fn opt_timestamp(value: Option<NaiveDateTime>) -> MeasureValue {
    value
        .map(MeasureValue::Timestamp)
        .unwrap_or(MeasureValue::Null)
}

/// Proportional frequency of the finest populated time component.
///
/// Each timestamp lands in exactly one bucket: sub-second, second, minute,
/// hour, or day (midnight).
fn precision_variance(values: &[NaiveDateTime]) -> MeasureValue {
    let total = values.len();
    let sub_second = values.iter().filter(|ts| ts.nanosecond() != 0).count();
    let second = values
        .iter()
        .filter(|ts| ts.nanosecond() == 0 && ts.second() != 0)
        .count();
    let minute = values
        .iter()
        .filter(|ts| ts.nanosecond() == 0 && ts.second() == 0 && ts.minute() != 0)
        .count();
    let hour = values
        .iter()
        .filter(|ts| {
            ts.nanosecond() == 0 && ts.second() == 0 && ts.minute() == 0 && ts.hour() != 0
        })
        .count();
    let day = total - sub_second - second - minute - hour;

    let mut buckets = BTreeMap::new();
    buckets.insert(
        "microsecond".to_string(),
        MeasureValue::Double(ratio(sub_second, total)),
    );
    buckets.insert(
        "second".to_string(),
        MeasureValue::Double(ratio(second, total)),
    );
    buckets.insert(
        "minute".to_string(),
        MeasureValue::Double(ratio(minute, total)),
    );
    buckets.insert("hour".to_string(), MeasureValue::Double(ratio(hour, total)));
    buckets.insert("day".to_string(), MeasureValue::Double(ratio(day, total)));
    MeasureValue::Map(buckets)
}
