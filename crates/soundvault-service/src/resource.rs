//! Generic HTTP-shaped CRUD orchestration over the data-access engine.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use soundvault_core::AppResult;
use soundvault_core::error::AppError;
use soundvault_core::traits::Table;
use soundvault_core::types::{Row, Value};
use soundvault_database::{DeleteReceipt, Engine, InsertReceipt, UpdateReceipt};

/// Entity-specific validation run before a create or update persists.
///
/// Hooks get the engine so they can run their own lookups (e.g. the user
/// uniqueness check) inside the same request.
#[async_trait]
pub trait ValidateHook: Send + Sync {
    /// Validate the fields of a record about to be created.
    async fn validate_create(&self, _engine: &Engine, _fields: &Row) -> AppResult<()> {
        Ok(())
    }

    /// Validate the fields of an update to the row with the given id.
    async fn validate_update(&self, _engine: &Engine, _id: Uuid, _fields: &Row) -> AppResult<()> {
        Ok(())
    }
}

/// The default always-pass hook.
#[derive(Debug, Clone, Copy)]
pub struct NoValidation;

#[async_trait]
impl ValidateHook for NoValidation {}

/// Generic create/retrieve/update/delete used by every entity's service.
///
/// Text field values are trimmed of surrounding whitespace before any
/// validation or persistence.
#[derive(Debug, Clone)]
pub struct ResourceService {
    engine: Arc<Engine>,
}

impl ResourceService {
    /// Creates a new resource service over the engine.
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    /// The underlying engine, for services needing direct access.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Create a record from caller-supplied fields.
    ///
    /// Primary-key and foreign-key enforcement are always on in this
    /// path; hooks run after trimming, before the insert.
    pub async fn create<T: Table>(
        &self,
        fields: Row,
        hook: &dyn ValidateHook,
    ) -> AppResult<InsertReceipt> {
        let fields = trim_text_fields(fields);
        hook.validate_create(&self.engine, &fields).await?;
        self.engine
            .insert_fields(T::schema(), fields, true, true)
            .await
    }

    /// Fetch one record by id, soft-deleted rows included.
    pub async fn get<T: Table>(&self, id: Uuid) -> AppResult<T> {
        let mut records: Vec<T> = self
            .engine
            .retrieve(Some(("id", Value::Uuid(id))))
            .await?;
        records.pop().ok_or_else(|| {
            AppError::not_found(format!("{id} does not exist in '{}'", T::schema().table))
        })
    }

    /// List all live records.
    pub async fn list<T: Table>(&self) -> AppResult<Vec<T>> {
        self.engine.retrieve(None).await
    }

    /// Apply a diff-based update to the row with the given id.
    pub async fn update<T: Table>(
        &self,
        id: Uuid,
        fields: Row,
        hook: &dyn ValidateHook,
    ) -> AppResult<UpdateReceipt> {
        let fields = trim_text_fields(fields);
        hook.validate_update(&self.engine, id, &fields).await?;
        self.engine.update::<T>(id, fields).await
    }

    /// Delete the row with the given id, soft or hard, with child checks.
    pub async fn delete<T: Table>(&self, id: Uuid, soft: bool) -> AppResult<DeleteReceipt> {
        let record: T = self.get(id).await?;
        self.engine.delete(&record, true, soft).await
    }
}

/// Trim surrounding whitespace from every text value in the row.
fn trim_text_fields(fields: Row) -> Row {
    let mut trimmed = Row::new();
    for (column, value) in fields.iter() {
        match value {
            Value::Text(text) => trimmed.set(column, text.trim()),
            other => trimmed.set(column, other.clone()),
        };
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_text_fields() {
        let row = Row::new()
            .with("username", "  alice  ")
            .with("disabled", false);
        let trimmed = trim_text_fields(row);
        assert_eq!(trimmed.get_or_null("username"), Value::Text("alice".into()));
        assert_eq!(trimmed.get_or_null("disabled"), Value::Boolean(false));
    }
}
