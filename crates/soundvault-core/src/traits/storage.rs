//! Object-storage trait for pluggable blob backends.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for external object-storage backends holding audio blobs.
///
/// The trait is defined here in `soundvault-core` and implemented in
/// `soundvault-storage`. Blobs are addressed by a server-generated name
/// that is never exposed to clients; time-limited read access is granted
/// through signed URLs.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Upload a blob under the given name.
    async fn put(&self, blob_name: &str, content: Bytes) -> AppResult<()>;

    /// Delete a blob. Deleting a missing blob is not an error.
    async fn delete(&self, blob_name: &str) -> AppResult<()>;

    /// Check whether a blob exists.
    async fn exists(&self, blob_name: &str) -> AppResult<bool>;

    /// Generate a time-limited signed read URL for a blob.
    async fn signed_url(&self, blob_name: &str, ttl: Duration) -> AppResult<String>;
}
