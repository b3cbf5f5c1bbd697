//! User registration, login, profile, and cascading delete.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use soundvault_auth::{AccessToken, PasswordHasher, TokenEncoder};
use soundvault_core::AppResult;
use soundvault_core::error::AppError;
use soundvault_core::traits::Table;
use soundvault_core::types::{Row, Value};
use soundvault_database::{DeleteReceipt, Engine, InsertReceipt, UpdateReceipt};
use soundvault_entity::{AudioFile, User};

use crate::audio::AudioService;
use crate::resource::{ResourceService, ValidateHook};

/// Login failures collapse to this one message so username probing and
/// password guessing are indistinguishable.
const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Data for self-service registration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterUser {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password, hashed before it reaches the engine.
    pub password: String,
    /// Display name.
    pub full_name: String,
}

/// Data for updating a user's own profile. Absent fields are untouched.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateUser {
    /// New login name.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New display name.
    pub full_name: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

/// Handles user account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// Generic CRUD orchestration.
    resource: ResourceService,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token issuer for login.
    encoder: Arc<TokenEncoder>,
    /// Audio service, for the delete cascade.
    audio: Arc<AudioService>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        resource: ResourceService,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<TokenEncoder>,
        audio: Arc<AudioService>,
    ) -> Self {
        Self {
            resource,
            hasher,
            encoder,
            audio,
        }
    }

    /// Register a new user.
    pub async fn register(&self, req: RegisterUser) -> AppResult<InsertReceipt> {
        if !req.email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        if req.password.trim().is_empty() {
            return Err(AppError::validation("Password cannot be empty"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let fields = Row::new()
            .with("username", req.username)
            .with("email", req.email)
            .with("password_hash", password_hash)
            .with("full_name", req.full_name)
            .with("disabled", false);

        let receipt = self
            .resource
            .create::<User>(fields, &UserUniquenessHook { exclude: None })
            .await?;
        info!(user_id = %receipt.id, "user registered");
        Ok(receipt)
    }

    /// Verify credentials and issue an access token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AccessToken> {
        let user = self
            .find_live_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::unauthorized(BAD_CREDENTIALS))?;

        if user.disabled || !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized(BAD_CREDENTIALS));
        }
        self.encoder.issue(user.id)
    }

    /// Fetch a live user's profile.
    pub async fn profile(&self, user_id: Uuid) -> AppResult<User> {
        let user: User = self.resource.get(user_id).await?;
        if user.is_deleted() {
            return Err(AppError::not_found(format!(
                "{user_id} does not exist in 'users'"
            )));
        }
        Ok(user)
    }

    /// Update a user's own profile fields.
    ///
    /// Soft-deleted users cannot be updated, even with a token issued
    /// before the delete.
    pub async fn update(&self, user_id: Uuid, req: UpdateUser) -> AppResult<UpdateReceipt> {
        self.profile(user_id).await?;

        if let Some(email) = &req.email {
            if !email.contains('@') {
                return Err(AppError::validation("Invalid email format"));
            }
        }

        let mut fields = Row::new();
        if let Some(username) = req.username {
            fields.set("username", username);
        }
        if let Some(email) = req.email {
            fields.set("email", email);
        }
        if let Some(full_name) = req.full_name {
            fields.set("full_name", full_name);
        }
        if let Some(password) = req.password {
            if password.trim().is_empty() {
                return Err(AppError::validation("Password cannot be empty"));
            }
            fields.set("password_hash", self.hasher.hash_password(&password)?);
        }

        self.resource
            .update::<User>(
                user_id,
                fields,
                &UserUniquenessHook {
                    exclude: Some(user_id),
                },
            )
            .await
    }

    /// Delete a user and, children first, every audio file it owns.
    ///
    /// A soft delete stamps every row and skips the engine's child check
    /// (nothing is physically removed); a hard delete removes child rows
    /// and blobs before the user row so the check passes.
    pub async fn delete(&self, user_id: Uuid, soft: bool) -> AppResult<DeleteReceipt> {
        let user = self.profile(user_id).await?;

        let children: Vec<AudioFile> = self
            .engine()
            .retrieve(Some(("user_id", Value::Uuid(user_id))))
            .await?;
        for child in children {
            self.audio.remove(child.id, soft).await?;
        }

        let receipt = self.engine().delete(&user, !soft, soft).await?;
        info!(%user_id, soft, "user deleted");
        Ok(receipt)
    }

    /// Look up the non-deleted user with the given username, if any.
    pub(crate) async fn find_live_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users: Vec<User> = self
            .engine()
            .retrieve(Some(("username", Value::Text(username.to_string()))))
            .await?;
        Ok(users.into_iter().find(|u| !u.is_deleted()))
    }

    fn engine(&self) -> &Engine {
        self.resource.engine()
    }
}

/// Enforces global username/email uniqueness, excluding the record's own
/// id on update.
struct UserUniquenessHook {
    exclude: Option<Uuid>,
}

impl UserUniquenessHook {
    async fn check(&self, engine: &Engine, fields: &Row) -> AppResult<()> {
        for column in ["username", "email"] {
            let value = fields.get_or_null(column);
            if value.is_null() {
                continue;
            }
            let rows = engine
                .retrieve_rows(User::schema(), Some((column, value)))
                .await?;
            let taken = rows.iter().any(|row| match self.exclude {
                Some(id) => row.uuid("id").ok() != Some(id),
                None => true,
            });
            if taken {
                return Err(AppError::duplicate_key(format!(
                    "{column} is already in use"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ValidateHook for UserUniquenessHook {
    async fn validate_create(&self, engine: &Engine, fields: &Row) -> AppResult<()> {
        self.check(engine, fields).await
    }

    async fn validate_update(&self, engine: &Engine, _id: Uuid, fields: &Row) -> AppResult<()> {
        self.check(engine, fields).await
    }
}
