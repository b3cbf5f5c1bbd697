//! Token endpoint.

use axum::Json;
use axum::extract::{Form, State};

use soundvault_auth::AccessToken;

use crate::dto::request::LoginForm;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /token
///
/// OAuth2-password-style login. Every failure renders as 401 with a
/// `WWW-Authenticate: Bearer` challenge.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, ApiError> {
    let token = state
        .user_service
        .login(&form.username, &form.password)
        .await?;
    Ok(Json(token))
}
