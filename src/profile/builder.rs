//! The profiler: orchestrates slicing, category resolution, and inspection
//! into a canonically sorted measurement table.

use tracing::{debug, info, instrument};

use crate::error::ProfileResult;
use crate::inspectors::{duplicate_row_count, inspector_for, Category};
use crate::table::Table;

use super::resolver::TypeResolver;
use super::slices::SliceIterator;
use super::types::{MeasurementRow, MeasurementTable};

/// Builder for [`Profiler`].
#[derive(Debug, Default)]
pub struct ProfilerBuilder {
    slicer: Option<String>,
    overrides: Vec<(String, Category)>,
    lag_depth: usize,
}

impl ProfilerBuilder {
    /// Partitions the table into slices by the distinct values of `column`.
    pub fn slicer(mut self, column: impl Into<String>) -> Self {
        self.slicer = Some(column.into());
        self
    }

    /// Forces `column` into `category` instead of dtype inspection.
    pub fn override_category(mut self, column: impl Into<String>, category: Category) -> Self {
        self.overrides.push((column.into(), category));
        self
    }

    /// Widens the profiled result with `depth` lag columns.
    pub fn lag_depth(mut self, depth: usize) -> Self {
        self.lag_depth = depth;
        self
    }

    /// Builds the profiler.
    pub fn build(self) -> Profiler {
        Profiler {
            slicer: self.slicer,
            overrides: self.overrides,
            lag_depth: self.lag_depth,
        }
    }
}

/// Computes per-column statistical profiles of a table, optionally
/// partitioned into ordered slices and widened with lag windows.
///
/// Output is uniquely determined by the input table and this configuration;
/// the canonical sort is the authoritative ordering regardless of iteration
/// order.
#[derive(Debug, Default)]
pub struct Profiler {
    slicer: Option<String>,
    overrides: Vec<(String, Category)>,
    lag_depth: usize,
}

impl Profiler {
    /// Creates a profiler with no slicer, no overrides, and no lag windows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder.
    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::default()
    }

    /// Profiles every column of `table` per slice.
    ///
    /// Overrides and the slicer are validated before any measurement is
    /// produced. Each column's category is resolved once, from the whole
    /// table, so a series never changes category across slices.
    #[instrument(skip(self, table), fields(rows = table.num_rows(), columns = table.num_columns()))]
    pub fn profile(&self, table: &Table) -> ProfileResult<MeasurementTable> {
        if let Some(slicer) = &self.slicer {
            table.column(slicer)?;
        }
        let resolver = TypeResolver::new(table, &self.overrides)?;
        let categories: Vec<(String, Category)> = table
            .column_names()
            .iter()
            .map(|name| Ok((name.clone(), resolver.resolve(name)?)))
            .collect::<ProfileResult<_>>()?;
        for (column, category) in &categories {
            debug!(column, category = %category, "resolved column category");
        }

        let duplicates = duplicate_row_count(table)?;
        if duplicates > 0 {
            info!(duplicates, "table contains duplicate rows");
        }

        let mut rows = Vec::new();
        for (key, sub_table) in SliceIterator::new(table, self.slicer.as_deref())? {
            for (column, category) in &categories {
                let inspector = inspector_for(*category);
                let array = sub_table.column(column)?;
                for (measure, value) in inspector.inspect(array)? {
                    rows.push(MeasurementRow {
                        inspector: *category,
                        column: column.clone(),
                        slice: key.clone(),
                        measure: measure.to_string(),
                        value,
                        lags: Vec::new(),
                    });
                }
            }
        }

        let mut result = MeasurementTable::new(rows);
        result.canonical_sort();
        if self.lag_depth > 0 {
            result.add_lag_windows(self.lag_depth);
        }
        info!(
            measurements = result.len(),
            lag_depth = result.lag_depth(),
            "profiled table"
        );
        Ok(result)
    }
}
