//! User self-service handlers.

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;

use soundvault_database::{DeleteReceipt, InsertReceipt, UpdateReceipt};
use soundvault_service::{RegisterUser, UpdateUser};

use crate::dto::request::{CreateUserForm, DeleteParams, UpdateUserForm};
use crate::dto::response::UserProfileResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /users/
pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<CreateUserForm>,
) -> Result<(StatusCode, Json<InsertReceipt>), ApiError> {
    let receipt = state
        .user_service
        .register(RegisterUser {
            username: form.username,
            email: form.email,
            password: form.password,
            full_name: form.full_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /users/
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = state.user_service.profile(auth.user_id()).await?;
    Ok(Json(user.into()))
}

/// PUT /users/
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Form(form): Form<UpdateUserForm>,
) -> Result<(StatusCode, Json<UpdateReceipt>), ApiError> {
    let receipt = state
        .user_service
        .update(
            auth.user_id(),
            UpdateUser {
                username: form.username,
                email: form.email,
                full_name: form.full_name,
                password: form.password,
            },
        )
        .await?;
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}

/// DELETE /users/
///
/// Soft delete by default; `?hard=true` removes rows and blobs.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DeleteParams>,
) -> Result<(StatusCode, Json<DeleteReceipt>), ApiError> {
    let receipt = state
        .user_service
        .delete(auth.user_id(), !params.hard)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}
