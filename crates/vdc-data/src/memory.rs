//! In-memory table store.
//!
//! Used for local development and tests. Tables are created lazily on first
//! insert; selecting from an absent table yields an empty result, matching
//! the hosted platform's behavior for empty tables.

use crate::store::{Match, Row, TableStore};
use crate::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// An in-memory [`TableStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    fail_inserts: RwLock<HashSet<String>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows. Replaces any existing content.
    pub fn seed(&self, table: impl Into<String>, rows: Vec<Row>) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.insert(table.into(), rows);
    }

    /// Make the next insert into `table` fail. One-shot: the flag clears
    /// once it has fired. Lets tests exercise partial-write recovery.
    pub fn fail_next_insert(&self, table: impl Into<String>) {
        let mut failing = self.fail_inserts.write().unwrap_or_else(|e| e.into_inner());
        failing.insert(table.into());
    }

    /// Number of rows currently in a table.
    pub fn row_count(&self, table: &str) -> usize {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.get(table).map_or(0, Vec::len)
    }

    fn generate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("row-{}", n + 1)
    }

    fn take_failure(&self, table: &str) -> bool {
        let mut failing = self.fail_inserts.write().unwrap_or_else(|e| e.into_inner());
        failing.remove(table)
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    async fn select_where(&self, table: &str, filter: &Match) -> Result<Vec<Row>, StoreError> {
        let rows = self.select(table).await?;
        Ok(rows.into_iter().filter(|r| filter.matches(r)).collect())
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Row, StoreError> {
        if self.take_failure(table) {
            return Err(StoreError::Query(format!(
                "insert into {} rejected",
                table
            )));
        }

        let has_id = matches!(row.get("id"), Some(Value::String(_)));
        if !has_id {
            row.insert("id".to_string(), Value::String(self.generate_id()));
        }

        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, filter: &Match, patch: Row) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };

        let mut updated = 0;
        for row in rows.iter_mut().filter(|r| filter.matches(r)) {
            for (column, value) in &patch {
                row.insert(column.clone(), value.clone());
            }
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: &Match) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };

        let len_before = rows.len();
        rows.retain(|r| !filter.matches(r));
        Ok((len_before - rows.len()) as u64)
    }
}
