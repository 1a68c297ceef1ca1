//! Column inspectors: one stateless statistic extractor per semantic category.
//!
//! Every column resolves to exactly one [`Category`]; [`inspector_for`] is the
//! dispatch table mapping a category to its extractor. Inspectors are pure
//! functions over a column producing an ordered `measure -> value` mapping.

pub mod base;
pub mod boolean;
pub mod datetime;
pub mod duplicates;
pub mod number;
pub mod string;

use std::fmt;
use std::str::FromStr;

use arrow::array::ArrayRef;
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};
use crate::measure::MeasureValue;

pub use base::GenericInspector;
pub use boolean::BooleanInspector;
pub use datetime::DatetimeInspector;
pub use duplicates::{duplicate_row_count, has_duplicate_rows};
pub use number::NumberInspector;
pub use string::StringInspector;

/// Semantic category of a column. Closed set; `Generic` is the deliberate
/// fallback for anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "bool")]
    Boolean,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "datetime")]
    Datetime,
    #[serde(rename = "generic")]
    Generic,
}

impl Category {
    /// Stable tag used in measurement rows and anomaly records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Boolean => "bool",
            Category::String => "string",
            Category::Number => "number",
            Category::Datetime => "datetime",
            Category::Generic => "generic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ProfileError;

    /// Parses an override string. Anything outside the closed set is an
    /// [`ProfileError::InvalidOverride`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bool" | "boolean" => Ok(Category::Boolean),
            "string" => Ok(Category::String),
            "number" | "numeric" => Ok(Category::Number),
            "datetime" | "date" => Ok(Category::Datetime),
            "generic" => Ok(Category::Generic),
            other => Err(ProfileError::InvalidOverride(other.to_string())),
        }
    }
}

/// Statistic-extraction capability for one category.
///
/// Implementations are stateless and side-effect-free; the measure order they
/// return is preserved until the canonical sort.
pub trait Inspector: Send + Sync {
    /// The category this inspector serves.
    fn category(&self) -> Category;

    /// Computes the measure mapping for one column.
    fn inspect(&self, column: &ArrayRef) -> ProfileResult<Vec<(&'static str, MeasureValue)>>;
}

/// Dispatch table from category to inspector.
pub fn inspector_for(category: Category) -> &'static dyn Inspector {
    match category {
        Category::Boolean => &BooleanInspector,
        Category::String => &StringInspector,
        Category::Number => &NumberInspector,
        Category::Datetime => &DatetimeInspector,
        Category::Generic => &GenericInspector,
    }
}
