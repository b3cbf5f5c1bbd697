//! The generic data-access engine.
//!
//! One engine serves every entity type: integrity checks are driven by
//! the static [`TableSchema`] descriptions and the schema registry, not
//! hard-coded per entity. Every public operation opens exactly one
//! backend transaction and commits or rolls back before returning, so a
//! failure at any intermediate step leaves stored state unchanged.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use soundvault_core::error::AppError;
use soundvault_core::AppResult;
use soundvault_core::traits::Table;
use soundvault_core::types::{
    unix_timestamp, ColumnDef, ColumnType, Row, TableSchema, Value,
};

use crate::backend::{Backend, Transaction};

/// Result of a successful insert.
#[derive(Debug, Clone, Serialize)]
pub struct InsertReceipt {
    /// The assigned primary key.
    pub id: Uuid,
    /// The stamped creation time (epoch seconds).
    pub created_at: i64,
}

/// Result of a successful update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReceipt {
    /// The updated row's primary key.
    pub id: Uuid,
    /// The stamped update time (epoch seconds).
    pub updated_at: i64,
}

/// Result of a successful delete (soft or hard).
#[derive(Debug, Clone, Serialize)]
pub struct DeleteReceipt {
    /// The deleted row's primary key.
    pub id: Uuid,
    /// The stamped deletion time (epoch seconds).
    pub deleted_at: i64,
}

/// Generic retrieve/insert/update/delete over any registered table.
#[derive(Clone)]
pub struct Engine {
    backend: Arc<dyn Backend>,
    registry: &'static [&'static TableSchema],
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("tables", &self.registry.iter().map(|s| s.table).collect::<Vec<_>>())
            .finish()
    }
}

impl Engine {
    /// Create an engine over a backend and the full schema registry.
    pub fn new(backend: Arc<dyn Backend>, registry: &'static [&'static TableSchema]) -> Self {
        Self { backend, registry }
    }

    // ── Retrieve ─────────────────────────────────────────────

    /// Retrieve typed records, optionally filtered by equality on one
    /// column. Without a filter, soft-deleted rows are excluded; a
    /// filtered retrieval (e.g. by id) still returns them.
    pub async fn retrieve<T: Table>(&self, filter: Option<(&str, Value)>) -> AppResult<Vec<T>> {
        let rows = self.retrieve_rows(T::schema(), filter).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Row-level retrieve used by the typed wrapper and validation hooks.
    pub async fn retrieve_rows(
        &self,
        schema: &'static TableSchema,
        filter: Option<(&str, Value)>,
    ) -> AppResult<Vec<Row>> {
        if let Some((column, _)) = &filter {
            if !schema.has_column(column) {
                return Err(AppError::schema(format!(
                    "Column '{column}' does not exist on '{}'",
                    schema.table
                )));
            }
        }

        let mut tx = self.backend.begin().await?;
        let result = tx
            .select(schema, filter.as_ref().map(|(c, v)| (*c, v)))
            .await;
        match result {
            Ok(mut rows) => {
                tx.commit().await?;
                if filter.is_none() {
                    rows.retain(|row| row.get_or_null("deleted_at").is_null());
                }
                Ok(rows)
            }
            Err(e) => {
                roll_back(tx).await;
                Err(e)
            }
        }
    }

    // ── Insert ───────────────────────────────────────────────

    /// Insert a typed record.
    pub async fn insert<T: Table>(
        &self,
        record: &T,
        enforce_pk: bool,
        enforce_fk: bool,
    ) -> AppResult<InsertReceipt> {
        self.insert_fields(T::schema(), record.to_row(), enforce_pk, enforce_fk)
            .await
    }

    /// Insert from a field map. The primary key is generated when absent;
    /// audit fields are stamped by the engine regardless of any
    /// caller-supplied values.
    pub async fn insert_fields(
        &self,
        schema: &'static TableSchema,
        fields: Row,
        enforce_pk: bool,
        enforce_fk: bool,
    ) -> AppResult<InsertReceipt> {
        let mut tx = self.backend.begin().await?;
        match self
            .insert_in_tx(&mut tx, schema, fields, enforce_pk, enforce_fk)
            .await
        {
            Ok(receipt) => {
                tx.commit().await?;
                debug!(table = schema.table, id = %receipt.id, "inserted row");
                Ok(receipt)
            }
            Err(e) => {
                roll_back(tx).await;
                Err(e)
            }
        }
    }

    async fn insert_in_tx(
        &self,
        tx: &mut Box<dyn Transaction>,
        schema: &'static TableSchema,
        fields: Row,
        enforce_pk: bool,
        enforce_fk: bool,
    ) -> AppResult<InsertReceipt> {
        let pk = primary_key(schema)?;

        let explicit_id = fields.get(pk.name).and_then(Value::as_uuid);
        let id = explicit_id.unwrap_or_else(Uuid::new_v4);
        let id_value = Value::Uuid(id);

        if enforce_pk && explicit_id.is_some() {
            let existing = tx.select(schema, Some((pk.name, &id_value))).await?;
            if !existing.is_empty() {
                return Err(AppError::duplicate_key(format!(
                    "{id} already exists in '{}'",
                    schema.table
                )));
            }
        }

        if enforce_fk {
            for col in schema.foreign_keys() {
                let Some(fk) = col.foreign_key else { continue };
                let value = fields.get_or_null(col.name);
                if value.is_null() {
                    return Err(AppError::referential_integrity(format!(
                        "foreign key column '{}' on '{}' has no value",
                        col.name, schema.table
                    )));
                }
                let parent = self.schema_for(fk.table)?;
                let parents = tx.select(parent, Some((fk.column, &value))).await?;
                if parents.is_empty() {
                    return Err(AppError::referential_integrity(format!(
                        "referential integrity violation: {} with {}={} does not exist",
                        fk.table, fk.column, value
                    )));
                }
            }
        }

        let created_at = unix_timestamp();
        let mut row = Row::new();
        for col in schema.columns {
            if col.primary_key {
                row.set(col.name, id);
            } else if col.name == "created_at" {
                row.set(col.name, created_at);
            } else if col.is_audit() {
                row.set(col.name, Value::Null);
            } else {
                let value = fields.get_or_null(col.name);
                check_column_value(schema, col, &value)?;
                row.set(col.name, value);
            }
        }

        tx.insert(schema, &row).await?;
        Ok(InsertReceipt { id, created_at })
    }

    // ── Update ───────────────────────────────────────────────

    /// Diff-based update of the row with the given id.
    ///
    /// Foreign-key and audit columns are never updated. A null supplied
    /// for a non-nullable column retains the stored value. Zero effective
    /// deltas is a deliberate rejection, not a silent success.
    pub async fn update<T: Table>(&self, id: Uuid, fields: Row) -> AppResult<UpdateReceipt> {
        let schema = T::schema();
        let mut tx = self.backend.begin().await?;
        match self.update_in_tx(&mut tx, schema, id, fields).await {
            Ok(receipt) => {
                tx.commit().await?;
                debug!(table = schema.table, id = %receipt.id, "updated row");
                Ok(receipt)
            }
            Err(e) => {
                roll_back(tx).await;
                Err(e)
            }
        }
    }

    async fn update_in_tx(
        &self,
        tx: &mut Box<dyn Transaction>,
        schema: &'static TableSchema,
        id: Uuid,
        fields: Row,
    ) -> AppResult<UpdateReceipt> {
        let pk = primary_key(schema)?;
        let id_value = Value::Uuid(id);

        let existing = tx.select(schema, Some((pk.name, &id_value))).await?;
        let Some(current) = existing.first() else {
            return Err(AppError::not_found(format!(
                "{id} does not exist in '{}'",
                schema.table
            )));
        };

        let mut updated = current.clone();
        let mut delta = false;
        for col in schema.columns {
            if col.primary_key || col.foreign_key.is_some() || col.is_audit() {
                continue;
            }
            let mut new_value = fields.get_or_null(col.name);
            if new_value.is_null() && !col.nullable {
                new_value = current.get_or_null(col.name);
            }
            if new_value != current.get_or_null(col.name) {
                check_column_value(schema, col, &new_value)?;
                updated.set(col.name, new_value);
                delta = true;
            }
        }

        if !delta {
            return Err(AppError::no_change(format!(
                "no changes detected for {id} in '{}'",
                schema.table
            )));
        }

        let updated_at = unix_timestamp();
        updated.set("updated_at", updated_at);
        tx.update(schema, &updated).await?;
        Ok(UpdateReceipt { id, updated_at })
    }

    // ── Delete ───────────────────────────────────────────────

    /// Delete a record, soft or hard.
    ///
    /// With `enforce_fk`, the registry is scanned for child tables whose
    /// foreign keys reference this table; existing child rows block the
    /// delete (children must be removed first).
    pub async fn delete<T: Table>(
        &self,
        record: &T,
        enforce_fk: bool,
        soft: bool,
    ) -> AppResult<DeleteReceipt> {
        let schema = T::schema();
        let mut tx = self.backend.begin().await?;
        match self
            .delete_in_tx(&mut tx, schema, record.id(), enforce_fk, soft)
            .await
        {
            Ok(receipt) => {
                tx.commit().await?;
                debug!(table = schema.table, id = %receipt.id, soft, "deleted row");
                Ok(receipt)
            }
            Err(e) => {
                roll_back(tx).await;
                Err(e)
            }
        }
    }

    async fn delete_in_tx(
        &self,
        tx: &mut Box<dyn Transaction>,
        schema: &'static TableSchema,
        id: Uuid,
        enforce_fk: bool,
        soft: bool,
    ) -> AppResult<DeleteReceipt> {
        let pk = primary_key(schema)?;
        let id_value = Value::Uuid(id);

        let existing = tx.select(schema, Some((pk.name, &id_value))).await?;
        let Some(current) = existing.first() else {
            return Err(AppError::not_found(format!(
                "{id} does not exist in '{}'",
                schema.table
            )));
        };

        if enforce_fk {
            for child in self.registry {
                for col in child.foreign_keys() {
                    let Some(fk) = col.foreign_key else { continue };
                    if fk.table != schema.table || fk.column != pk.name {
                        continue;
                    }
                    let children = tx.select(child, Some((col.name, &id_value))).await?;
                    if !children.is_empty() {
                        return Err(AppError::referential_integrity(format!(
                            "referential integrity violation: {} references still exist in '{}'",
                            children.len(),
                            child.table
                        )));
                    }
                }
            }
        }

        let deleted_at = unix_timestamp();
        if soft {
            let mut stamped = current.clone();
            stamped.set("deleted_at", deleted_at);
            tx.update(schema, &stamped).await?;
        } else {
            tx.delete(schema, &id_value).await?;
        }
        Ok(DeleteReceipt { id, deleted_at })
    }

    fn schema_for(&self, table: &str) -> AppResult<&'static TableSchema> {
        self.registry
            .iter()
            .find(|s| s.table == table)
            .copied()
            .ok_or_else(|| AppError::schema(format!("table '{table}' is not registered")))
    }
}

async fn roll_back(tx: Box<dyn Transaction>) {
    if let Err(e) = tx.rollback().await {
        warn!(error = %e, "transaction rollback failed");
    }
}

fn primary_key(schema: &'static TableSchema) -> AppResult<&'static ColumnDef> {
    schema
        .primary_key()
        .ok_or_else(|| AppError::schema(format!("table '{}' has no primary key", schema.table)))
}

/// Validate a non-audit value against its column declaration.
fn check_column_value(
    schema: &'static TableSchema,
    col: &'static ColumnDef,
    value: &Value,
) -> AppResult<()> {
    if value.is_null() {
        if col.nullable {
            return Ok(());
        }
        return Err(AppError::validation(format!(
            "required column '{}' missing for '{}'",
            col.name, schema.table
        )));
    }

    let type_ok = matches!(
        (col.ty, value),
        (ColumnType::Uuid, Value::Uuid(_))
            | (ColumnType::Text, Value::Text(_))
            | (ColumnType::Integer, Value::Integer(_))
            | (ColumnType::Boolean, Value::Boolean(_))
    );
    if !type_ok {
        return Err(AppError::validation(format!(
            "column '{}' on '{}' expects {:?}, got {}",
            col.name,
            schema.table,
            col.ty,
            value.type_name()
        )));
    }

    if let (Some(max_len), Value::Text(text)) = (col.max_len, value) {
        if text.chars().count() > max_len {
            return Err(AppError::validation(format!(
                "column '{}' on '{}' exceeds maximum length {}",
                col.name, schema.table, max_len
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundvault_core::error::ErrorKind;
    use soundvault_entity::{schema_registry, AudioFile, User};

    use crate::backend::memory::MemoryBackend;

    fn test_engine() -> Engine {
        Engine::new(Arc::new(MemoryBackend::new()), schema_registry())
    }

    fn user_fields(username: &str, email: &str) -> Row {
        Row::new()
            .with("username", username)
            .with("email", email)
            .with("password_hash", "h".repeat(60))
            .with("full_name", "Test User")
            .with("disabled", false)
    }

    async fn insert_user(engine: &Engine, username: &str, email: &str) -> Uuid {
        engine
            .insert_fields(User::schema(), user_fields(username, email), true, true)
            .await
            .unwrap()
            .id
    }

    async fn insert_audio(engine: &Engine, user_id: Uuid) -> Uuid {
        let file = AudioFile::new(user_id, "demo", "podcast", Uuid::new_v4(), "audio/mpeg");
        engine.insert(&file, true, true).await.unwrap().id
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_stamps_created_at() {
        let engine = test_engine();
        let before = unix_timestamp();
        let receipt = engine
            .insert_fields(User::schema(), user_fields("alice", "a@x.com"), true, true)
            .await
            .unwrap();
        let after = unix_timestamp();

        assert!(receipt.created_at >= before && receipt.created_at <= after);

        let stored: Vec<User> = engine
            .retrieve(Some(("id", Value::Uuid(receipt.id))))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].created_at, receipt.created_at);
        assert_eq!(stored[0].updated_at, None);
        assert_eq!(stored[0].deleted_at, None);
    }

    #[tokio::test]
    async fn test_insert_explicit_duplicate_id_fails() {
        let engine = test_engine();
        let user = User::new("bob", "b@x.com", "h".repeat(60), "Bob B");
        engine.insert(&user, true, false).await.unwrap();

        let err = engine.insert(&user, true, false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateKey);
    }

    #[tokio::test]
    async fn test_insert_fk_missing_parent_fails_and_leaves_storage_unchanged() {
        let engine = test_engine();
        let orphan = AudioFile::new(Uuid::new_v4(), "x", "y", Uuid::new_v4(), "audio/wav");

        let err = engine.insert(&orphan, true, true).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ReferentialIntegrity);

        let stored: Vec<AudioFile> = engine.retrieve(None).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_insert_fk_with_existing_parent_succeeds() {
        let engine = test_engine();
        let user_id = insert_user(&engine, "carol", "c@x.com").await;
        let audio_id = insert_audio(&engine, user_id).await;

        let stored: Vec<AudioFile> = engine
            .retrieve(Some(("user_id", Value::Uuid(user_id))))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, audio_id);
    }

    #[tokio::test]
    async fn test_update_with_identical_fields_is_no_change() {
        let engine = test_engine();
        let id = insert_user(&engine, "dan", "d@x.com").await;

        let err = engine
            .update::<User>(id, user_fields("dan", "d@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoChange);
    }

    #[tokio::test]
    async fn test_update_single_field_stamps_updated_at_only() {
        let engine = test_engine();
        let id = insert_user(&engine, "erin", "e@x.com").await;

        let receipt = engine
            .update::<User>(id, Row::new().with("full_name", "Erin Updated"))
            .await
            .unwrap();

        let stored: Vec<User> = engine
            .retrieve(Some(("id", Value::Uuid(id))))
            .await
            .unwrap();
        let user = &stored[0];
        assert_eq!(user.full_name, "Erin Updated");
        assert_eq!(user.username, "erin");
        assert_eq!(user.email, "e@x.com");
        assert_eq!(user.updated_at, Some(receipt.updated_at));
        assert!(receipt.updated_at >= user.created_at);
        assert_eq!(user.deleted_at, None);
    }

    #[tokio::test]
    async fn test_update_null_for_non_nullable_retains_existing() {
        let engine = test_engine();
        let id = insert_user(&engine, "fay", "f@x.com").await;

        // Only full_name supplied; every absent non-nullable column keeps
        // its stored value instead of being nulled.
        engine
            .update::<User>(id, Row::new().with("full_name", "Fay F."))
            .await
            .unwrap();

        let stored: Vec<User> = engine
            .retrieve(Some(("id", Value::Uuid(id))))
            .await
            .unwrap();
        assert_eq!(stored[0].username, "fay");
        assert_eq!(stored[0].password_hash, "h".repeat(60));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let engine = test_engine();
        let err = engine
            .update::<User>(Uuid::new_v4(), Row::new().with("full_name", "Ghost"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_parent_with_children_fails_child_first_succeeds() {
        let engine = test_engine();
        let user_id = insert_user(&engine, "gus", "g@x.com").await;
        let audio_id = insert_audio(&engine, user_id).await;

        let users: Vec<User> = engine
            .retrieve(Some(("id", Value::Uuid(user_id))))
            .await
            .unwrap();
        let err = engine.delete(&users[0], true, false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ReferentialIntegrity);

        let audio: Vec<AudioFile> = engine
            .retrieve(Some(("id", Value::Uuid(audio_id))))
            .await
            .unwrap();
        engine.delete(&audio[0], true, false).await.unwrap();
        engine.delete(&users[0], true, false).await.unwrap();

        let remaining: Vec<User> = engine.retrieve(None).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_row_retrievable_by_id() {
        let engine = test_engine();
        let id = insert_user(&engine, "hana", "h@x.com").await;
        let users: Vec<User> = engine
            .retrieve(Some(("id", Value::Uuid(id))))
            .await
            .unwrap();

        let receipt = engine.delete(&users[0], false, true).await.unwrap();

        let by_id: Vec<User> = engine
            .retrieve(Some(("id", Value::Uuid(id))))
            .await
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].deleted_at, Some(receipt.deleted_at));

        // Soft-deleted rows are excluded from the unfiltered listing.
        let all: Vec<User> = engine.retrieve(None).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_hard_delete_removes_row() {
        let engine = test_engine();
        let id = insert_user(&engine, "ivan", "i@x.com").await;
        let users: Vec<User> = engine
            .retrieve(Some(("id", Value::Uuid(id))))
            .await
            .unwrap();

        engine.delete(&users[0], false, false).await.unwrap();

        let by_id: Vec<User> = engine
            .retrieve(Some(("id", Value::Uuid(id))))
            .await
            .unwrap();
        assert!(by_id.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_unknown_column_is_schema_error() {
        let engine = test_engine();
        let err = engine
            .retrieve::<User>(Some(("no_such_column", Value::Null)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Schema);
    }

    #[tokio::test]
    async fn test_insert_over_max_length_is_rejected() {
        let engine = test_engine();
        let fields = user_fields(&"x".repeat(21), "long@x.com");
        let err = engine
            .insert_fields(User::schema(), fields, true, true)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let stored: Vec<User> = engine.retrieve(None).await.unwrap();
        assert!(stored.is_empty());
    }
}
