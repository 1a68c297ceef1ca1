//! Semantic category resolution for columns.

use arrow::datatypes::DataType;

use crate::error::{ProfileError, ProfileResult};
use crate::inspectors::Category;
use crate::table::{string_values, Table};

/// Resolves each column to its semantic [`Category`].
///
/// Overrides win over dtype inspection and are validated eagerly at
/// construction. The default resolution path never fails: unrecognized
/// columns land in [`Category::Generic`].
pub struct TypeResolver<'a> {
    table: &'a Table,
    overrides: &'a [(String, Category)],
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver, verifying that every override targets an existing
    /// column.
    pub fn new(table: &'a Table, overrides: &'a [(String, Category)]) -> ProfileResult<Self> {
        for (column, _) in overrides {
            table.column(column)?;
        }
        Ok(Self { table, overrides })
    }

    /// Resolves one column, falling back to [`Category::Generic`].
    pub fn resolve(&self, column: &str) -> ProfileResult<Category> {
        if let Some(category) = self.override_for(column) {
            return Ok(category);
        }
        let array = self.table.column(column)?;
        let category = match array.data_type() {
            DataType::Boolean => Category::Boolean,
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
                if self.all_boolean_literals(column)? {
                    Category::Boolean
                } else {
                    Category::String
                }
            }
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => Category::Datetime,
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64 => Category::Number,
            _ => Category::Generic,
        };
        Ok(category)
    }

    /// Resolves one column, refusing the generic fallback.
    pub fn resolve_strict(&self, column: &str) -> ProfileResult<Category> {
        match self.resolve(column)? {
            Category::Generic => Err(ProfileError::TypeResolutionUnavailable(column.to_string())),
            category => Ok(category),
        }
    }

    fn override_for(&self, column: &str) -> Option<Category> {
        self.overrides
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, category)| *category)
    }

    /// True when the column holds at least one value and every non-null value
    /// is literally `true` or `false`.
    fn all_boolean_literals(&self, column: &str) -> ProfileResult<bool> {
        let values = string_values(self.table.column(column)?)?;
        let mut any = false;
        for value in values.iter().flatten() {
            if value != "true" && value != "false" {
                return Ok(false);
            }
            any = true;
        }
        Ok(any)
    }
}
