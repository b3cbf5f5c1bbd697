//! HTTP handlers, organized by domain.

pub mod audio;
pub mod auth;
pub mod user;
