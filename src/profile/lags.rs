//! Lag-window construction over the canonically sorted measurement table.

use tracing::debug;

use crate::measure::MeasureValue;

use super::types::MeasurementTable;

impl MeasurementTable {
    /// Widens every row with `lag_1..lag_depth` historical values.
    ///
    /// The table must already be in canonical order, so the row `d` positions
    /// earlier is the same (column, measure) series `d` slices ago whenever
    /// the series extends that far back. Each depth is computed independently
    /// from its own positional offset; crossing a series boundary at one
    /// depth leaves shallower depths intact.
    pub(crate) fn add_lag_windows(&mut self, depth: usize) {
        let rows = self.rows();
        let computed: Vec<Vec<Option<MeasureValue>>> = (0..rows.len())
            .map(|position| {
                (1..=depth)
                    .map(|d| {
                        if position < d {
                            return None;
                        }
                        let current = &rows[position];
                        let prior = &rows[position - d];
                        if prior.column == current.column && prior.measure == current.measure {
                            Some(prior.value.clone())
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .collect();

        for (row, lags) in self.rows_mut().iter_mut().zip(computed) {
            row.lags = lags;
        }
        self.set_lag_depth(depth);
        debug!(depth, rows = self.len(), "built lag windows");
    }
}
