//! Inspector for numeric columns.

use std::collections::BTreeMap;

use arrow::array::ArrayRef;

use crate::error::ProfileResult;
use crate::measure::MeasureValue;
use crate::table::float_values;

use super::base::{core_inspect, opt_double, ratio};
use super::{Category, Inspector};

/// Emits the core measures plus aggregate statistics, sign/zero ratios, and
/// value-count extremes for a numeric column.
#[derive(Debug, Default)]
pub struct NumberInspector;

impl Inspector for NumberInspector {
    fn category(&self) -> Category {
        Category::Number
    }

    fn inspect(&self, column: &ArrayRef) -> ProfileResult<Vec<(&'static str, MeasureValue)>> {
        let mut measures = core_inspect(column)?;
        let all = float_values(column)?;
        let rows = all.len();
        let values: Vec<f64> = all.into_iter().flatten().collect();

        let negatives = values.iter().filter(|v| **v < 0.0).count();
        let zeros = values.iter().filter(|v| **v == 0.0).count();
        let (top_five, bottom_five) = value_count_extremes(&values);
        let skew = value_skew(&top_five, &bottom_five);

        measures.push(("min_value", opt_double(values.iter().copied().reduce(f64::min))));
        measures.push(("max_value", opt_double(values.iter().copied().reduce(f64::max))));
        measures.push(("negative_ratio", MeasureValue::Double(ratio(negatives, rows))));
        measures.push(("mean_value", opt_double(mean(&values))));
        measures.push(("median_value", opt_double(median(&values))));
        measures.push(("stdev", opt_double(sample_stdev(&values))));
        measures.push(("zero_ratio", MeasureValue::Double(ratio(zeros, rows))));
        measures.push(("top_five_value_counts", counts_map(&top_five)));
        measures.push(("bottom_five_value_counts", counts_map(&bottom_five)));
        measures.push(("value_skew", skew));
        Ok(measures)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Sample standard deviation (n-1 denominator); undefined below two values.
fn sample_stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// The five most and five least frequent values with their counts.
fn value_count_extremes(values: &[f64]) -> (Vec<(String, i64)>, Vec<(String, i64)>) {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    let mut entries: Vec<(String, i64)> = counts.into_iter().collect();

    // BTreeMap iteration already fixed key order; sorting by count keeps ties
    // deterministic.
    let mut top = entries.clone();
    top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top.truncate(5);

    entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(5);

    (top, entries)
}

fn counts_map(entries: &[(String, i64)]) -> MeasureValue {
    MeasureValue::Map(
        entries
            .iter()
            .map(|(key, count)| (key.clone(), MeasureValue::Long(*count)))
            .collect(),
    )
}

/// Ratio of the rarest five counts to the most frequent five counts.
fn value_skew(top: &[(String, i64)], bottom: &[(String, i64)]) -> MeasureValue {
    let top_sum: i64 = top.iter().map(|(_, c)| c).sum();
    if top_sum == 0 {
        return MeasureValue::Null;
    }
    let bottom_sum: i64 = bottom.iter().map(|(_, c)| c).sum();
    MeasureValue::Double(bottom_sum as f64 / top_sum as f64)
}
