//! Lag-windowed anomaly detection over a profiled measurement table.
//!
//! Every bound (measure, category) series is scored rule by rule at each
//! window depth; an anomaly corroborated by more historical periods scores
//! higher.

mod bindings;
mod rules;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{ProfileError, ProfileResult};
use crate::inspectors::Category;
use crate::profile::{MeasurementRow, MeasurementTable, SliceKey};

use bindings::rules_for;
pub use rules::{Rule, DEFAULT_ABS_PERCENT_THRESHOLD};

/// One rule evaluation at one window depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub inspector: Category,
    pub column: String,
    pub slice: Option<SliceKey>,
    pub measure: String,
    pub rule: String,
    /// Number of historical periods the rule observed.
    pub window_depth: usize,
    pub flag: u8,
    /// `window_depth * flag`.
    pub score: i64,
}

/// A column's total anomaly score across all retained records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnScore {
    pub column: String,
    pub score: i64,
}

/// Builder for [`AnomalyDetector`].
#[derive(Debug, Default)]
pub struct AnomalyDetectorBuilder {
    target_slice: Option<SliceKey>,
}

impl AnomalyDetectorBuilder {
    /// Restricts detection to the measurements of one slice. Lag windows
    /// still reach back into earlier slices.
    pub fn target_slice(mut self, key: SliceKey) -> Self {
        self.target_slice = Some(key);
        self
    }

    /// Builds the detector.
    pub fn build(self) -> AnomalyDetector {
        AnomalyDetector {
            target_slice: self.target_slice,
        }
    }
}

/// Scores a lag-widened measurement table against the rule catalog and ranks
/// columns by total anomaly score.
#[derive(Debug, Default)]
pub struct AnomalyDetector {
    target_slice: Option<SliceKey>,
}

impl AnomalyDetector {
    /// Creates a detector over every slice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder.
    pub fn builder() -> AnomalyDetectorBuilder {
        AnomalyDetectorBuilder::default()
    }

    /// Runs the rule catalog over `profiled` and returns the ranked outcome.
    ///
    /// The input must be non-empty and lag-widened; detection against a bare
    /// profile has no window to compare against.
    #[instrument(skip(self, profiled), fields(rows = profiled.len(), lag_depth = profiled.lag_depth()))]
    pub fn detect(&self, profiled: &MeasurementTable) -> ProfileResult<DetectionOutcome> {
        if profiled.is_empty() {
            return Err(ProfileError::construction(
                "measurement table is empty; profile a table first",
            ));
        }
        if profiled.lag_depth() == 0 {
            return Err(ProfileError::construction(
                "measurement table carries no lag windows; profile with a lag depth",
            ));
        }
        if let Some(target) = &self.target_slice {
            let present = profiled
                .rows()
                .iter()
                .any(|row| row.slice.as_ref() == Some(target));
            if !present {
                return Err(ProfileError::construction(format!(
                    "target slice '{target}' not present in the measurement table"
                )));
            }
        }

        let records: Vec<AnomalyRecord> = profiled
            .rows()
            .iter()
            .filter(|row| match &self.target_slice {
                Some(target) => row.slice.as_ref() == Some(target),
                None => true,
            })
            .flat_map(|row| evaluate_row(row, profiled.lag_depth()))
            .collect();

        let evaluated = records.len();
        let retained: Vec<AnomalyRecord> =
            records.into_iter().filter(|r| r.score > 0).collect();
        info!(evaluated, retained = retained.len(), "scored measurement table");
        Ok(DetectionOutcome::new(retained))
    }
}

/// Evaluates every bound rule for one row at increasing window depths,
/// stopping at the first depth whose lag is missing or non-numeric.
fn evaluate_row(row: &MeasurementRow, lag_depth: usize) -> Vec<AnomalyRecord> {
    let rules: Vec<Rule> = rules_for(&row.measure, row.inspector).collect();
    if rules.is_empty() {
        return Vec::new();
    }
    let Some(current) = row.value.as_f64() else {
        debug!(
            column = row.column,
            measure = row.measure,
            "skipping non-numeric measurement"
        );
        return Vec::new();
    };

    let mut records = Vec::new();
    let mut window = Vec::with_capacity(lag_depth);
    for depth in 1..=lag_depth {
        let Some(lag) = row.lag(depth).and_then(|value| value.as_f64()) else {
            break;
        };
        window.push(lag);
        for rule in &rules {
            let flag = rule.apply(current, &window);
            records.push(AnomalyRecord {
                inspector: row.inspector,
                column: row.column.clone(),
                slice: row.slice.clone(),
                measure: row.measure.clone(),
                rule: rule.name().to_string(),
                window_depth: depth,
                flag: u8::from(flag),
                score: if flag { depth as i64 } else { 0 },
            });
        }
    }
    records
}

/// The retained anomaly records plus the derived column ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    records: Vec<AnomalyRecord>,
    ranking: Vec<ColumnScore>,
}

impl DetectionOutcome {
    fn new(records: Vec<AnomalyRecord>) -> Self {
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for record in &records {
            *totals.entry(record.column.as_str()).or_default() += record.score;
        }
        let mut ranking: Vec<ColumnScore> = totals
            .into_iter()
            .map(|(column, score)| ColumnScore {
                column: column.to_string(),
                score,
            })
            .collect();
        // descending by score; the BTreeMap already yields names ascending,
        // and the stable sort preserves that for ties
        ranking.sort_by(|a, b| b.score.cmp(&a.score));
        Self { records, ranking }
    }

    /// Columns ranked by total anomaly score, descending.
    pub fn ranking(&self) -> &[ColumnScore] {
        &self.ranking
    }

    /// All retained anomaly records (score > 0).
    pub fn records(&self) -> &[AnomalyRecord] {
        &self.records
    }

    /// Retained records for one column.
    pub fn column_summary(&self, column: &str) -> Vec<&AnomalyRecord> {
        self.records.iter().filter(|r| r.column == column).collect()
    }

    /// Retained records for one rule.
    pub fn rule_summary(&self, rule: &str) -> Vec<&AnomalyRecord> {
        self.records.iter().filter(|r| r.rule == rule).collect()
    }

    /// Serializes the outcome to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
