//! User entity model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use soundvault_core::AppResult;
use soundvault_core::traits::Table;
use soundvault_core::types::{Row, TableSchema};

use super::schema::USER_SCHEMA;

/// A registered user in the SoundVault system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Bcrypt password hash (60-character fixed format).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub full_name: String,
    /// Whether the account is disabled.
    pub disabled: bool,
    /// When the row was inserted (epoch seconds, stamped by the engine).
    pub created_at: i64,
    /// When the row was last updated.
    pub updated_at: Option<i64>,
    /// When the row was soft-deleted.
    pub deleted_at: Option<i64>,
}

impl User {
    /// Build a new user record. The id is generated server-side; audit
    /// fields are stamped by the engine at insert time.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            disabled: false,
            created_at: 0,
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Whether the row carries a soft-delete stamp.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Table for User {
    fn schema() -> &'static TableSchema {
        &USER_SCHEMA
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id)
            .with("username", self.username.clone())
            .with("email", self.email.clone())
            .with("password_hash", self.password_hash.clone())
            .with("full_name", self.full_name.clone())
            .with("disabled", self.disabled)
            .with("created_at", self.created_at)
            .with("updated_at", self.updated_at)
            .with("deleted_at", self.deleted_at)
    }

    fn from_row(row: &Row) -> AppResult<Self> {
        Ok(Self {
            id: row.uuid("id")?,
            username: row.text("username")?,
            email: row.text("email")?,
            password_hash: row.text("password_hash")?,
            full_name: row.text("full_name")?,
            disabled: row.boolean("disabled")?,
            created_at: row.integer("created_at")?,
            updated_at: row.opt_integer("updated_at"),
            deleted_at: row.opt_integer("deleted_at"),
        })
    }
}
