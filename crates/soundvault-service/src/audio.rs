//! Audio file upload, listing, and signed-URL access.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use soundvault_core::AppResult;
use soundvault_core::error::AppError;
use soundvault_core::traits::{ObjectStorage, Table};
use soundvault_core::types::Value;
use soundvault_database::{DeleteReceipt, InsertReceipt};
use soundvault_entity::AudioFile;
use soundvault_storage::mime::extension_for_mime;

use crate::resource::{NoValidation, ResourceService};

/// Handles audio blob storage and metadata bookkeeping.
///
/// Uploads write the blob first and the metadata row second; a failed
/// insert removes the orphaned blob so the store and the table stay in
/// step.
#[derive(Debug, Clone)]
pub struct AudioService {
    /// Generic CRUD orchestration.
    resource: ResourceService,
    /// Blob store.
    storage: Arc<dyn ObjectStorage>,
    /// Signed URL lifetime.
    url_ttl: Duration,
}

impl AudioService {
    /// Creates a new audio service.
    pub fn new(
        resource: ResourceService,
        storage: Arc<dyn ObjectStorage>,
        url_ttl_minutes: u64,
    ) -> Self {
        Self {
            resource,
            storage,
            url_ttl: Duration::from_secs(url_ttl_minutes * 60),
        }
    }

    /// Store an uploaded blob and insert its metadata row.
    ///
    /// The blob name is a fresh server-side UUID; clients only ever see
    /// the metadata id. Referential integrity against the owning user is
    /// enforced by the engine at insert.
    pub async fn upload(
        &self,
        user_id: Uuid,
        description: &str,
        category: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<InsertReceipt> {
        let file = AudioFile::new(user_id, description, category, Uuid::new_v4(), content_type);
        let key = object_key(&file);

        self.storage.put(&key, data).await?;
        match self
            .resource
            .create::<AudioFile>(file.to_row(), &NoValidation)
            .await
        {
            Ok(receipt) => {
                info!(audio_id = %receipt.id, %user_id, "audio file uploaded");
                Ok(receipt)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&key).await {
                    warn!(blob = key, error = %cleanup, "failed to remove orphaned blob");
                }
                Err(e)
            }
        }
    }

    /// List the caller's live audio files.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<AudioFile>> {
        let mut files: Vec<AudioFile> = self
            .resource
            .engine()
            .retrieve(Some(("user_id", Value::Uuid(user_id))))
            .await?;
        files.retain(|f| f.deleted_at.is_none());
        Ok(files)
    }

    /// Produce a time-limited signed read URL for one audio file.
    ///
    /// Only the owner may request a URL; anyone else gets the same
    /// authentication error a bad token would.
    pub async fn signed_url(&self, requester: Uuid, audio_id: Uuid) -> AppResult<String> {
        let file: AudioFile = self.resource.get(audio_id).await?;
        if file.deleted_at.is_some() {
            return Err(AppError::not_found(format!(
                "{audio_id} does not exist in 'audio_files'"
            )));
        }
        if file.user_id != requester {
            return Err(AppError::unauthorized(
                "Not permitted to access this audio file",
            ));
        }
        self.storage
            .signed_url(&object_key(&file), self.url_ttl)
            .await
    }

    /// Delete one audio file, soft or hard. A hard delete also removes
    /// the blob.
    pub async fn remove(&self, audio_id: Uuid, soft: bool) -> AppResult<DeleteReceipt> {
        let file: AudioFile = self.resource.get(audio_id).await?;
        let receipt = self.resource.delete::<AudioFile>(audio_id, soft).await?;
        if !soft {
            let key = object_key(&file);
            if let Err(e) = self.storage.delete(&key).await {
                warn!(blob = key, error = %e, "failed to remove blob for deleted row");
            }
        }
        Ok(receipt)
    }
}

/// Object-store key for a metadata row: blob UUID plus the extension
/// derived from the recorded MIME type.
fn object_key(file: &AudioFile) -> String {
    match extension_for_mime(&file.content_type) {
        Some(ext) => format!("{}{}", file.blob_name, ext),
        None => file.blob_name.to_string(),
    }
}
