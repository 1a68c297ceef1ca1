//! The fixed catalog of anomaly-scoring rules.

use serde::{Deserialize, Serialize};

/// Default relative-error threshold for [`Rule::AbsPercentError`].
pub const DEFAULT_ABS_PERCENT_THRESHOLD: f64 = 0.1;

/// One anomaly-scoring rule.
///
/// A rule is a pure predicate over the current value and the ordered lag
/// window; the engine turns the flag into a depth-weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// Flags a ratio that was zero across the whole window and is now nonzero.
    PositiveRatio,
    /// Flags a ratio that was nonzero across the whole window and is now zero.
    ZeroRatio,
    /// Flags a count that collapsed to exactly one after exceeding one.
    SingleValue,
    /// Flags a relative deviation from the window mean beyond `threshold`.
    /// A zero mean degenerates to "current is nonzero".
    AbsPercentError { threshold: f64 },
    /// Flags a value that moved against the expected direction: below the
    /// window maximum when `greater_than`, above the window minimum otherwise.
    Consistency { greater_than: bool },
}

impl Rule {
    /// Stable rule name used in anomaly records and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::PositiveRatio => "positive_ratio_flag",
            Rule::ZeroRatio => "zero_ratio_flag",
            Rule::SingleValue => "single_value_flag",
            Rule::AbsPercentError { .. } => "abs_percent_error_flag",
            Rule::Consistency { .. } => "consistency_flag",
        }
    }

    /// Evaluates the rule; `true` means flagged.
    pub fn apply(&self, current: f64, lag_values: &[f64]) -> bool {
        if lag_values.is_empty() {
            return false;
        }
        match self {
            Rule::PositiveRatio => lag_values.iter().all(|v| *v == 0.0) && current != 0.0,
            Rule::ZeroRatio => lag_values.iter().all(|v| *v != 0.0) && current == 0.0,
            Rule::SingleValue => lag_values.iter().all(|v| *v > 1.0) && current == 1.0,
            Rule::AbsPercentError { threshold } => {
                let mean = lag_values.iter().sum::<f64>() / lag_values.len() as f64;
                if mean == 0.0 {
                    current != 0.0
                } else {
                    (current - mean).abs() / mean.abs() > *threshold
                }
            }
            Rule::Consistency { greater_than } => {
                if *greater_than {
                    let reference = lag_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    current < reference
                } else {
                    let reference = lag_values.iter().copied().fold(f64::INFINITY, f64::min);
                    current > reference
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ratio_needs_all_zero_lags() {
        let rule = Rule::PositiveRatio;
        assert!(rule.apply(0.5, &[0.0, 0.0]));
        assert!(!rule.apply(0.0, &[0.0, 0.0]));
        assert!(!rule.apply(0.5, &[0.0, 0.1]));
    }

    #[test]
    fn zero_ratio_needs_all_nonzero_lags() {
        let rule = Rule::ZeroRatio;
        assert!(rule.apply(0.0, &[3.0, 4.0, 5.0]));
        assert!(!rule.apply(0.0, &[3.0, 0.0, 5.0]));
        assert!(!rule.apply(0.1, &[3.0, 4.0, 5.0]));
    }

    #[test]
    fn single_value_detects_collapse_to_one() {
        let rule = Rule::SingleValue;
        assert!(rule.apply(1.0, &[4.0, 7.0]));
        assert!(!rule.apply(1.0, &[1.0, 7.0]));
        assert!(!rule.apply(2.0, &[4.0, 7.0]));
    }

    #[test]
    fn abs_percent_error_against_window_mean() {
        let rule = Rule::AbsPercentError {
            threshold: DEFAULT_ABS_PERCENT_THRESHOLD,
        };
        // mean = 10, relative error = 0.2 > 0.1
        assert!(rule.apply(12.0, &[10.0, 10.0]));
        assert!(!rule.apply(10.5, &[10.0, 10.0]));
    }

    #[test]
    fn abs_percent_error_zero_mean_degenerates() {
        let rule = Rule::AbsPercentError { threshold: 0.1 };
        assert!(rule.apply(0.1, &[0.0, 0.0]));
        assert!(!rule.apply(0.0, &[0.0, 0.0]));
        // negative mean uses its magnitude as the denominator
        assert!(rule.apply(-15.0, &[-10.0, -10.0]));
    }

    #[test]
    fn consistency_direction() {
        let greater = Rule::Consistency { greater_than: true };
        assert!(greater.apply(5.0, &[10.0, 7.0]));
        assert!(!greater.apply(10.0, &[10.0, 7.0]));

        let lesser = Rule::Consistency {
            greater_than: false,
        };
        assert!(lesser.apply(12.0, &[10.0, 11.0]));
        assert!(!lesser.apply(10.0, &[10.0, 11.0]));
    }

    #[test]
    fn empty_window_never_flags() {
        assert!(!Rule::PositiveRatio.apply(1.0, &[]));
        assert!(!Rule::Consistency { greater_than: true }.apply(1.0, &[]));
    }
}
