//! In-memory storage backend.
//!
//! Holds every table as a vector of rows behind one async mutex. A
//! transaction takes the lock for its whole lifetime and mutates a
//! working copy, so commit is atomic and rollback is simply dropping
//! the copy. Used by the test suite; not intended for production data.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use soundvault_core::error::AppError;
use soundvault_core::AppResult;
use soundvault_core::types::{Row, TableSchema, Value};

use super::{Backend, Transaction};

type Tables = HashMap<String, Vec<Row>>;

/// In-memory relational backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn begin(&self) -> AppResult<Box<dyn Transaction>> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, working }))
    }
}

/// A transaction over a working copy of the table map.
struct MemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

impl MemoryTransaction {
    fn table_mut(&mut self, schema: &'static TableSchema) -> &mut Vec<Row> {
        self.working.entry(schema.table.to_string()).or_default()
    }

    fn pk_name(schema: &'static TableSchema) -> AppResult<&'static str> {
        schema
            .primary_key()
            .map(|c| c.name)
            .ok_or_else(|| AppError::schema(format!("table '{}' has no primary key", schema.table)))
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn select(
        &mut self,
        schema: &'static TableSchema,
        filter: Option<(&str, &Value)>,
    ) -> AppResult<Vec<Row>> {
        let pk = Self::pk_name(schema)?;
        let mut rows: Vec<Row> = self
            .working
            .get(schema.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| match filter {
                        Some((column, value)) => row.get_or_null(column) == *value,
                        None => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        rows.sort_by_key(|row| {
            (
                row.opt_integer("created_at").unwrap_or(0),
                row.get_or_null(pk)
                    .as_uuid()
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            )
        });
        Ok(rows)
    }

    async fn insert(&mut self, schema: &'static TableSchema, row: &Row) -> AppResult<()> {
        let pk = Self::pk_name(schema)?;
        let id = row.get_or_null(pk);
        let table = self.table_mut(schema);
        if table.iter().any(|existing| existing.get_or_null(pk) == id) {
            return Err(AppError::database(format!(
                "duplicate primary key in '{}'",
                schema.table
            )));
        }
        table.push(row.clone());
        Ok(())
    }

    async fn update(&mut self, schema: &'static TableSchema, row: &Row) -> AppResult<()> {
        let pk = Self::pk_name(schema)?;
        let id = row.get_or_null(pk);
        let table = self.table_mut(schema);
        match table.iter_mut().find(|existing| existing.get_or_null(pk) == id) {
            Some(existing) => {
                *existing = row.clone();
                Ok(())
            }
            None => Err(AppError::database(format!(
                "no row to update in '{}'",
                schema.table
            ))),
        }
    }

    async fn delete(&mut self, schema: &'static TableSchema, id: &Value) -> AppResult<()> {
        let pk = Self::pk_name(schema)?;
        let table = self.table_mut(schema);
        table.retain(|existing| existing.get_or_null(pk) != *id);
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> AppResult<()> {
        *self.guard = self.working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        // The working copy is dropped; the shared map was never touched.
        Ok(())
    }
}
