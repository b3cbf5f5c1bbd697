//! # soundvault-core
//!
//! Core crate for SoundVault. Contains the unified error system,
//! configuration schemas, the static table-schema description types,
//! the dynamic row/value representation, and the object-storage trait.
//!
//! This crate has **no** internal dependencies on other SoundVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
