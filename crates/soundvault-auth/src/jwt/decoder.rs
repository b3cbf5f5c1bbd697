//! JWT token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use soundvault_core::config::AuthConfig;
use soundvault_core::error::AppError;

use super::claims::Claims;
use super::encoder::parse_algorithm;

/// Validates JWT access tokens.
///
/// Every decode failure maps to an authentication error so malformed,
/// forged, and expired tokens are indistinguishable to the caller.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let mut validation = Validation::new(parse_algorithm(&config.signing_algorithm)?);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates an access token, returning the user id
    /// from the subject claim.
    pub fn decode(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized("Could not validate credentials"),
                }
            })?;

        Ok(token_data.claims.sub)
    }
}
