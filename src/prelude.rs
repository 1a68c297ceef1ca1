//! Prelude for commonly used types in slice-guard.

pub use crate::detect::{AnomalyDetector, AnomalyRecord, ColumnScore, DetectionOutcome};
pub use crate::error::{ProfileError, ProfileResult};
pub use crate::inspectors::Category;
pub use crate::logging::LoggingConfig;
pub use crate::measure::MeasureValue;
pub use crate::profile::{MeasurementRow, MeasurementTable, Profiler, SliceKey};
pub use crate::table::{array_ref, Table};
