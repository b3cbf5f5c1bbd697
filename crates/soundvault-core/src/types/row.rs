//! A dynamic record: named column values for one table row.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::value::Value;

/// An ordered map of column name to [`Value`], the shape in which records
/// cross the engine boundary in both directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: BTreeMap<String, Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Get a column value, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Get a column value, treating absence as `Null`.
    pub fn get_or_null(&self, column: &str) -> Value {
        self.values.get(column).cloned().unwrap_or(Value::Null)
    }

    /// Iterate over `(column, value)` pairs in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // Typed accessors used by `Table::from_row` implementations. A missing
    // or mistyped column is an internal decode failure, not caller input.

    /// Require a UUID column.
    pub fn uuid(&self, column: &str) -> AppResult<Uuid> {
        self.get(column)
            .and_then(Value::as_uuid)
            .ok_or_else(|| decode_error(column, "uuid"))
    }

    /// Require a text column.
    pub fn text(&self, column: &str) -> AppResult<String> {
        self.get(column)
            .and_then(Value::as_text)
            .map(str::to_string)
            .ok_or_else(|| decode_error(column, "text"))
    }

    /// Require an integer column.
    pub fn integer(&self, column: &str) -> AppResult<i64> {
        self.get(column)
            .and_then(Value::as_integer)
            .ok_or_else(|| decode_error(column, "integer"))
    }

    /// Require a boolean column.
    pub fn boolean(&self, column: &str) -> AppResult<bool> {
        self.get(column)
            .and_then(Value::as_boolean)
            .ok_or_else(|| decode_error(column, "boolean"))
    }

    /// Read a nullable integer column; absent counts as null.
    pub fn opt_integer(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(Value::as_integer)
    }
}

fn decode_error(column: &str, expected: &str) -> AppError {
    AppError::internal(format!("row column '{column}' missing or not {expected}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_null_for_absent_column() {
        let row = Row::new().with("a", 1i64);
        assert_eq!(row.get_or_null("a"), Value::Integer(1));
        assert_eq!(row.get_or_null("b"), Value::Null);
    }

    #[test]
    fn test_typed_accessors() {
        let id = Uuid::new_v4();
        let row = Row::new()
            .with("id", id)
            .with("name", "alice")
            .with("disabled", false);
        assert_eq!(row.uuid("id").unwrap(), id);
        assert_eq!(row.text("name").unwrap(), "alice");
        assert!(!row.boolean("disabled").unwrap());
        assert!(row.integer("name").is_err());
    }
}
