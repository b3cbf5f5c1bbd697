//! # soundvault-entity
//!
//! Domain entity models for SoundVault. Every model in this crate
//! represents one database table row, declares a static [`TableSchema`],
//! and implements the [`Table`] trait so the generic data-access engine
//! can operate on it without per-entity code.
//!
//! [`TableSchema`]: soundvault_core::types::TableSchema
//! [`Table`]: soundvault_core::traits::Table

pub mod audio;
pub mod user;

use soundvault_core::types::TableSchema;

pub use audio::AudioFile;
pub use user::User;

static REGISTRY: [&TableSchema; 2] = [&user::USER_SCHEMA, &audio::AUDIO_FILE_SCHEMA];

/// Every table schema in the system, in parent-before-child order.
///
/// The engine consults this to discover child tables when enforcing
/// referential integrity on delete.
pub fn schema_registry() -> &'static [&'static TableSchema] {
    &REGISTRY
}
