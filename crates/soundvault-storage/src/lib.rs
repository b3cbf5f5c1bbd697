//! # soundvault-storage
//!
//! Object-storage providers for SoundVault audio blobs.
//!
//! Blobs live outside the relational store, addressed by server-generated
//! names that clients never see. Read access is granted through
//! time-limited HMAC-signed URLs rather than by proxying bytes.

use std::sync::Arc;

use soundvault_core::config::StorageConfig;
use soundvault_core::error::AppError;
use soundvault_core::result::AppResult;
use soundvault_core::traits::ObjectStorage;

pub mod mime;
pub mod providers;
pub mod signer;

pub use providers::local::LocalStorageProvider;
pub use signer::UrlSigner;

/// Build the configured object-storage provider.
pub async fn build_storage(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStorage>> {
    match config.provider.as_str() {
        "local" => Ok(Arc::new(LocalStorageProvider::new(config).await?)),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}'"
        ))),
    }
}
