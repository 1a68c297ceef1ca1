//! # Slice Guard - Sliced Data Profiling and Anomaly Detection
//!
//! Slice Guard computes per-column statistical profiles of tabular data,
//! optionally partitioned into ordered "slices" (e.g. time buckets), and
//! flags anomalies by comparing each slice's measurements against a bounded
//! window of immediately preceding slices.
//!
//! ## Overview
//!
//! Every column resolves to a semantic category (boolean, string, number,
//! datetime, or generic), and each category's inspector produces a set of
//! named measures: null ratios, distinct counts, means, string-pattern
//! ratios, date extremes, and so on. Profiling one slice at a time yields a
//! long-format measurement table in which each `(column, measure)` pair forms
//! a series over slices; widening that table with lag windows turns anomaly
//! detection into a pure scan with a fixed rule catalog.
//!
//! ## Quick Start
//!
//! ```rust
//! use slice_guard::prelude::*;
//! use arrow::array::{Float64Array, StringArray};
//!
//! # fn example() -> ProfileResult<()> {
//! let table = Table::try_new(vec![
//!     ("period", array_ref(StringArray::from(vec!["A", "B", "C"]))),
//!     ("reading", array_ref(Float64Array::from(vec![10.0, 10.0, 100.0]))),
//! ])?;
//!
//! let profiled = Profiler::builder()
//!     .slicer("period")
//!     .lag_depth(2)
//!     .build()
//!     .profile(&table)?;
//!
//! let outcome = AnomalyDetector::new().detect(&profiled)?;
//! for entry in outcome.ranking() {
//!     println!("{}: {}", entry.column, entry.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! - [`profile::TypeResolver`] maps each column to a [`inspectors::Category`]
//!   via overrides or dtype inspection.
//! - [`profile::SliceIterator`] partitions the table into ordered slices.
//! - [`profile::Profiler`] flattens inspector output into a canonically
//!   sorted [`profile::MeasurementTable`] and builds the lag windows.
//! - [`detect::AnomalyDetector`] scores every bound measure with the rule
//!   catalog and ranks columns by total anomaly score.
//!
//! The whole pipeline is synchronous and pure: output depends only on the
//! input table and the configuration, never on iteration order or prior runs.

pub mod detect;
pub mod error;
pub mod inspectors;
pub mod logging;
pub mod measure;
pub mod prelude;
pub mod profile;
pub mod table;

pub use error::{ProfileError, ProfileResult};
