//! Request DTOs.

use serde::{Deserialize, Serialize};

/// `POST /token` form body (OAuth2 password style).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// `POST /users/` form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserForm {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub full_name: String,
}

/// `PUT /users/` form body. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserForm {
    /// New login name.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New display name.
    pub full_name: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

/// `DELETE /users/` query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteParams {
    /// Physically remove rows and blobs instead of soft-deleting.
    #[serde(default)]
    pub hard: bool,
}
