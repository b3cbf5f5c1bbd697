//! Application state shared across all handlers.

use std::sync::Arc;

use soundvault_auth::{PasswordHasher, TokenDecoder, TokenEncoder};
use soundvault_core::config::AppConfig;
use soundvault_core::traits::ObjectStorage;
use soundvault_database::Engine;
use soundvault_service::{AudioService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The generic data-access engine.
    pub engine: Arc<Engine>,
    /// Blob store.
    pub storage: Arc<dyn ObjectStorage>,
    /// Password hasher (bcrypt).
    pub password_hasher: Arc<PasswordHasher>,
    /// JWT token encoder.
    pub token_encoder: Arc<TokenEncoder>,
    /// JWT token decoder and validator.
    pub token_decoder: Arc<TokenDecoder>,
    /// User account service.
    pub user_service: Arc<UserService>,
    /// Audio file service.
    pub audio_service: Arc<AudioService>,
}
