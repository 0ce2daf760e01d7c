//! The table store trait and row helpers.
//!
//! The hosted platform exposes tables of JSON rows. The core only ever
//! filters on column equality, so [`Match`] is deliberately that narrow.

use crate::StoreError;
use async_trait::async_trait;
use serde_json::Value;

/// A table row: a JSON object keyed by column name.
pub type Row = serde_json::Map<String, Value>;

/// A column-equals-value row predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Column to compare.
    pub column: String,
    /// Value the column must equal.
    pub value: Value,
}

impl Match {
    /// Match rows where `column` equals `value`.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Test a row against this predicate.
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column) == Some(&self.value)
    }
}

/// Async access to the hosted structured table store.
///
/// Every method is an independent suspension point; the store offers no
/// cross-call transaction. Callers that need multi-write consistency must
/// compensate themselves.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetch all rows of a table.
    async fn select(&self, table: &str) -> Result<Vec<Row>, StoreError>;

    /// Fetch the rows of a table matching a predicate.
    async fn select_where(&self, table: &str, filter: &Match) -> Result<Vec<Row>, StoreError>;

    /// Insert a row, returning it with store-assigned columns (`id`) filled.
    async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError>;

    /// Patch all rows matching a predicate. Returns the number updated.
    async fn update(&self, table: &str, filter: &Match, patch: Row) -> Result<u64, StoreError>;

    /// Delete all rows matching a predicate. Returns the number deleted.
    async fn delete(&self, table: &str, filter: &Match) -> Result<u64, StoreError>;
}

/// Get a required string column.
pub fn get_str(row: &Row, table: &str, column: &str) -> Result<String, StoreError> {
    row.get(column)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| malformed(table, column, "string"))
}

/// Get an optional string column; null and absent both yield None.
pub fn opt_str(row: &Row, column: &str) -> Option<String> {
    row.get(column).and_then(Value::as_str).map(str::to_string)
}

/// Get a required integer column.
pub fn get_i64(row: &Row, table: &str, column: &str) -> Result<i64, StoreError> {
    row.get(column)
        .and_then(Value::as_i64)
        .ok_or_else(|| malformed(table, column, "integer"))
}

/// Get a required numeric column.
pub fn get_f64(row: &Row, table: &str, column: &str) -> Result<f64, StoreError> {
    row.get(column)
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed(table, column, "number"))
}

/// Get a required boolean column.
pub fn get_bool(row: &Row, table: &str, column: &str) -> Result<bool, StoreError> {
    row.get(column)
        .and_then(Value::as_bool)
        .ok_or_else(|| malformed(table, column, "boolean"))
}

fn malformed(table: &str, column: &str, expected: &str) -> StoreError {
    StoreError::MalformedRow {
        table: table.to_string(),
        detail: format!("expected {} column `{}`", expected, column),
    }
}
