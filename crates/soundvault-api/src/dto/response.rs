//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use soundvault_entity::{AudioFile, User};

/// Current-user profile for `GET /users/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Whether the account is disabled.
    pub disabled: bool,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            disabled: user.disabled,
        }
    }
}

/// One row of the caller's audio listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFileSummary {
    /// Audio file ID.
    pub id: Uuid,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
}

impl From<AudioFile> for AudioFileSummary {
    fn from(file: AudioFile) -> Self {
        Self {
            id: file.id,
            description: file.description,
            category: file.category,
        }
    }
}

/// Signed-URL response for `GET /audio_files/token/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioUrlResponse {
    /// Audio file ID.
    pub audio_id: Uuid,
    /// Time-limited signed read URL.
    pub audio_url: String,
}
