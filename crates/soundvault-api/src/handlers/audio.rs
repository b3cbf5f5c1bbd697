//! Audio file handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;

use soundvault_core::error::AppError;
use soundvault_database::InsertReceipt;

use crate::dto::response::{AudioFileSummary, AudioUrlResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Parsed multipart upload body.
struct UploadParts {
    description: String,
    category: String,
    content_type: String,
    data: Bytes,
}

/// POST /audio_files/
///
/// Multipart body: text fields `description` and `category`, file part
/// `audio_file`.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<InsertReceipt>), ApiError> {
    let parts = read_upload(multipart).await?;
    let receipt = state
        .audio_service
        .upload(
            auth.user_id(),
            &parts.description,
            &parts.category,
            &parts.content_type,
            parts.data,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /audio_files/
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AudioFileSummary>>, ApiError> {
    let files = state.audio_service.list_for_user(auth.user_id()).await?;
    Ok(Json(files.into_iter().map(Into::into).collect()))
}

/// GET /audio_files/token/{id}
pub async fn signed_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(audio_id): Path<Uuid>,
) -> Result<Json<AudioUrlResponse>, ApiError> {
    let audio_url = state
        .audio_service
        .signed_url(auth.user_id(), audio_id)
        .await?;
    Ok(Json(AudioUrlResponse {
        audio_id,
        audio_url,
    }))
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadParts, ApiError> {
    let mut description = None;
    let mut category = None;
    let mut content_type = None;
    let mut data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("description") => {
                description = Some(read_text(field).await?);
            }
            Some("category") => {
                category = Some(read_text(field).await?);
            }
            Some("audio_file") => {
                content_type = Some(
                    field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string(),
                );
                data = Some(field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read audio_file part: {e}"))
                })?);
            }
            _ => {}
        }
    }

    Ok(UploadParts {
        description: description
            .ok_or_else(|| AppError::validation("Missing multipart field 'description'"))?,
        category: category
            .ok_or_else(|| AppError::validation("Missing multipart field 'category'"))?,
        content_type: content_type
            .ok_or_else(|| AppError::validation("Missing multipart field 'audio_file'"))?,
        data: data.ok_or_else(|| AppError::validation("Missing multipart field 'audio_file'"))?,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    let name = field.name().unwrap_or("field").to_string();
    Ok(field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Failed to read field '{name}': {e}")))?)
}
