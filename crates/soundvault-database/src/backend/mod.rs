//! Object-safe storage backend traits.
//!
//! The engine talks to the relational store exclusively through these
//! traits, so the same integrity logic runs against PostgreSQL in
//! production and the in-memory backend in tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use soundvault_core::AppResult;
use soundvault_core::types::{Row, TableSchema, Value};

/// A relational storage backend capable of opening transactions.
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug + 'static {
    /// Open a new transaction.
    async fn begin(&self) -> AppResult<Box<dyn Transaction>>;
}

/// One open transaction against the backend.
///
/// The engine issues every read and write of an operation through a
/// single transaction and finishes it with exactly one of
/// [`commit`](Self::commit) or [`rollback`](Self::rollback); a dropped
/// transaction must behave like a rollback.
#[async_trait]
pub trait Transaction: Send {
    /// Select rows, optionally filtered by equality on one column.
    ///
    /// Rows are returned ordered by `created_at`, then primary key.
    /// Soft-deleted rows are included; the engine applies the
    /// active-rows filter itself.
    async fn select(
        &mut self,
        schema: &'static TableSchema,
        filter: Option<(&str, &Value)>,
    ) -> AppResult<Vec<Row>>;

    /// Insert one full row.
    async fn insert(&mut self, schema: &'static TableSchema, row: &Row) -> AppResult<()>;

    /// Replace the row whose primary key matches the given row's.
    async fn update(&mut self, schema: &'static TableSchema, row: &Row) -> AppResult<()>;

    /// Physically remove the row with the given primary-key value.
    async fn delete(&mut self, schema: &'static TableSchema, id: &Value) -> AppResult<()>;

    /// Commit the transaction.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Roll the transaction back.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}
