//! Profiling pipeline: category resolution, slicing, inspection, and
//! lag-window construction.

mod builder;
mod lags;
mod resolver;
mod slices;
mod types;

pub use builder::{Profiler, ProfilerBuilder};
pub use resolver::TypeResolver;
pub use slices::SliceIterator;
pub use types::{MeasurementRow, MeasurementTable, SliceKey};
