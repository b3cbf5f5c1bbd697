//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use soundvault_core::config::AuthConfig;
use soundvault_core::error::AppError;

use super::claims::Claims;

/// Creates signed JWT access tokens.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Signing algorithm.
    algorithm: Algorithm,
    /// Access token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("algorithm", &self.algorithm)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

/// A freshly issued bearer token, serialized directly in the login
/// response body.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AccessToken {
    /// The signed JWT.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            algorithm: parse_algorithm(&config.signing_algorithm)?,
            ttl_minutes: config.access_token_ttl_minutes as i64,
        })
    }

    /// Issues an access token for the given user.
    pub fn issue(&self, user_id: Uuid) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let access_token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(AccessToken {
            access_token,
            token_type: "bearer".to_string(),
        })
    }
}

/// Parses a jsonwebtoken algorithm name from configuration.
pub(crate) fn parse_algorithm(name: &str) -> Result<Algorithm, AppError> {
    name.parse().map_err(|_| {
        AppError::configuration(format!("Unsupported token signing algorithm '{name}'"))
    })
}
