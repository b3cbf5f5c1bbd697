//! Local filesystem storage provider.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use soundvault_core::config::StorageConfig;
use soundvault_core::error::{AppError, ErrorKind};
use soundvault_core::result::AppResult;
use soundvault_core::traits::ObjectStorage;

use crate::signer::UrlSigner;

/// Local filesystem object storage.
///
/// Blobs are flat files under `root_path/container`. Blob names are
/// server-generated UUIDs (plus extension) so no path traversal is
/// possible from user input, but names are still sanitized before
/// resolution.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Directory all blobs are stored in.
    root: PathBuf,
    /// Signer for time-limited read URLs.
    signer: UrlSigner,
}

impl LocalStorageProvider {
    /// Create a local provider rooted at `root_path/container`.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path).join(&config.container);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            signer: UrlSigner::new(&config.url_secret, &config.public_base_url),
        })
    }

    /// Resolve a blob name to its path under the root.
    fn resolve(&self, blob_name: &str) -> AppResult<PathBuf> {
        if blob_name.is_empty() || blob_name.contains('/') || blob_name.contains("..") {
            return Err(AppError::storage(format!(
                "Invalid blob name: {blob_name}"
            )));
        }
        Ok(self.root.join(blob_name))
    }
}

#[async_trait]
impl ObjectStorage for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn put(&self, blob_name: &str, content: Bytes) -> AppResult<()> {
        let path = self.resolve(blob_name)?;
        fs::write(&path, &content).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {blob_name}"),
                e,
            )
        })?;
        debug!(blob_name, bytes = content.len(), "stored blob");
        Ok(())
    }

    async fn delete(&self, blob_name: &str) -> AppResult<()> {
        let path = self.resolve(blob_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {blob_name}"),
                e,
            )),
        }
    }

    async fn exists(&self, blob_name: &str) -> AppResult<bool> {
        let path = self.resolve(blob_name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn signed_url(&self, blob_name: &str, ttl: Duration) -> AppResult<String> {
        if !self.exists(blob_name).await? {
            return Err(AppError::not_found(format!("Blob not found: {blob_name}")));
        }
        self.signer.sign(blob_name, ttl)
    }
}
