//! Error types for the profiling and detection pipeline.

use thiserror::Error;

/// Result type for profiling and detection operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Errors surfaced by table construction, profiling, and anomaly detection.
///
/// The pipeline performs no I/O; every error is raised synchronously to the
/// caller and nothing is retried.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A slicer, override target, or lookup column is absent from the table.
    #[error("column '{0}' not found in table")]
    ColumnNotFound(String),

    /// An override names a category outside the closed category set.
    #[error(
        "'{0}' is not a valid category; expected one of \
         'bool', 'string', 'number', 'datetime', or 'generic'"
    )]
    InvalidOverride(String),

    /// A caller required a strict category and none of the resolution rules
    /// applied. The default resolution path never raises this; `generic`
    /// absorbs the unresolved case.
    #[error("column '{0}' did not resolve to a strict category")]
    TypeResolutionUnavailable(String),

    /// The slicer column's data type does not form a totally ordered key set.
    #[error(
        "slicer column '{column}' has incomparable key type {data_type}; \
         slice keys must be string, numeric, or temporal"
    )]
    IncomparableSliceKey { column: String, data_type: String },

    /// Malformed input table (mismatched column lengths, duplicate names).
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Detection was requested against a result of the wrong shape.
    #[error("detection requires a profiled result: {0}")]
    Construction(String),

    /// Arrow computation error.
    #[error("arrow computation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl ProfileError {
    /// Creates a construction error with the given message.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Creates an invalid-table error with the given message.
    pub fn invalid_table(msg: impl Into<String>) -> Self {
        Self::InvalidTable(msg.into())
    }
}
