//! # soundvault-api
//!
//! HTTP API layer for SoundVault using Axum: application state, the
//! error-to-response mapping, the bearer-token extractor, DTOs,
//! handlers, and the router.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
