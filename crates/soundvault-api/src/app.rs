//! Application builder — wires state, services, and router into an
//! Axum app.

use std::sync::Arc;

use axum::Router;

use soundvault_auth::{PasswordHasher, TokenDecoder, TokenEncoder};
use soundvault_core::config::AppConfig;
use soundvault_core::result::AppResult;
use soundvault_core::traits::ObjectStorage;
use soundvault_database::Engine;
use soundvault_service::{AudioService, ResourceService, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Construct the full application state from its infrastructure pieces.
///
/// The engine and storage are injected so the binary can pass Postgres
/// and a real blob store while tests pass the in-memory backend and a
/// tempdir.
pub fn build_state(
    config: AppConfig,
    engine: Arc<Engine>,
    storage: Arc<dyn ObjectStorage>,
) -> AppResult<AppState> {
    let password_hasher = Arc::new(PasswordHasher::new());
    let token_encoder = Arc::new(TokenEncoder::new(&config.auth)?);
    let token_decoder = Arc::new(TokenDecoder::new(&config.auth)?);

    let resource = ResourceService::new(Arc::clone(&engine));
    let audio_service = Arc::new(AudioService::new(
        resource.clone(),
        Arc::clone(&storage),
        config.storage.url_ttl_minutes,
    ));
    let user_service = Arc::new(UserService::new(
        resource,
        Arc::clone(&password_hasher),
        Arc::clone(&token_encoder),
        Arc::clone(&audio_service),
    ));

    Ok(AppState {
        config: Arc::new(config),
        engine,
        storage,
        password_hasher,
        token_encoder,
        token_decoder,
        user_service,
        audio_service,
    })
}

/// Builds the Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
