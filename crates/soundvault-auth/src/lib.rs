//! # soundvault-auth
//!
//! Password hashing and JWT access-token handling for SoundVault.
//!
//! Passwords are hashed with bcrypt; access tokens are stateless JWTs
//! carrying the user id in the `sub` claim. There is no refresh token
//! and no server-side revocation: a token is valid until it expires.

pub mod jwt;
pub mod password;

pub use jwt::{AccessToken, Claims, TokenDecoder, TokenEncoder};
pub use password::PasswordHasher;
