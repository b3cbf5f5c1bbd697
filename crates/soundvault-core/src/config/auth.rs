//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing.
    #[serde(default = "default_secret")]
    pub secret_key: String,
    /// Token signing algorithm name (jsonwebtoken spelling, e.g. "HS256").
    #[serde(default = "default_algorithm")]
    pub signing_algorithm: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_ttl")]
    pub access_token_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret(),
            signing_algorithm: default_algorithm(),
            access_token_ttl_minutes: default_ttl(),
        }
    }
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_ttl() -> u64 {
    30
}
