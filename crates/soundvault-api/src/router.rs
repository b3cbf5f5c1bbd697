//! Route definitions for the SoundVault HTTP API.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes;

    Router::new()
        .route("/token", post(handlers::auth::login))
        .merge(user_routes())
        .merge(audio_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// User self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/", post(handlers::user::create_user))
        .route("/users/", get(handlers::user::get_profile))
        .route("/users/", put(handlers::user::update_user))
        .route("/users/", delete(handlers::user::delete_user))
}

/// Audio upload, listing, and signed URLs.
fn audio_routes() -> Router<AppState> {
    Router::new()
        .route("/audio_files/", post(handlers::audio::upload))
        .route("/audio_files/", get(handlers::audio::list))
        .route("/audio_files/token/{id}", get(handlers::audio::signed_url))
}
