//! Audio file metadata model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use soundvault_core::AppResult;
use soundvault_core::traits::Table;
use soundvault_core::types::{Row, TableSchema};

use super::schema::AUDIO_FILE_SCHEMA;

/// Metadata for one uploaded audio file.
///
/// The binary content lives in external object storage under `blob_name`;
/// that identifier is internal and never exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFile {
    /// Unique, client-facing identifier.
    pub id: Uuid,
    /// Owning user (foreign key to `users.id`).
    pub user_id: Uuid,
    /// Free-text description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Object-storage blob identifier.
    #[serde(skip_serializing)]
    pub blob_name: Uuid,
    /// MIME type of the uploaded content.
    pub content_type: String,
    /// When the row was inserted (epoch seconds, stamped by the engine).
    pub created_at: i64,
    /// When the row was last updated.
    pub updated_at: Option<i64>,
    /// When the row was soft-deleted.
    pub deleted_at: Option<i64>,
}

impl AudioFile {
    /// Build a new metadata record for a freshly stored blob.
    pub fn new(
        user_id: Uuid,
        description: impl Into<String>,
        category: impl Into<String>,
        blob_name: Uuid,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: description.into(),
            category: category.into(),
            blob_name,
            content_type: content_type.into(),
            created_at: 0,
            updated_at: None,
            deleted_at: None,
        }
    }
}

impl Table for AudioFile {
    fn schema() -> &'static TableSchema {
        &AUDIO_FILE_SCHEMA
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id)
            .with("user_id", self.user_id)
            .with("description", self.description.clone())
            .with("category", self.category.clone())
            .with("blob_name", self.blob_name)
            .with("content_type", self.content_type.clone())
            .with("created_at", self.created_at)
            .with("updated_at", self.updated_at)
            .with("deleted_at", self.deleted_at)
    }

    fn from_row(row: &Row) -> AppResult<Self> {
        Ok(Self {
            id: row.uuid("id")?,
            user_id: row.uuid("user_id")?,
            description: row.text("description")?,
            category: row.text("category")?,
            blob_name: row.uuid("blob_name")?,
            content_type: row.text("content_type")?,
            created_at: row.integer("created_at")?,
            updated_at: row.opt_integer("updated_at"),
            deleted_at: row.opt_integer("deleted_at"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_name_never_serialized() {
        let file = AudioFile::new(Uuid::new_v4(), "demo", "podcast", Uuid::new_v4(), "audio/mpeg");
        let json = serde_json::to_value(&file).unwrap();
        assert!(json.get("blob_name").is_none());
        assert!(json.get("id").is_some());
    }
}
