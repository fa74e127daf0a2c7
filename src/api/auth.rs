//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{LoginRequest, RegisterUser},
};

use super::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT to send as `Authorization: Bearer <token>`
    pub token: String,
}

/// Exchange a username and password for a token
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = TokenResponse),
        (status = 400, description = "Malformed payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid username/password", body = crate::error::ErrorResponse)
    )
)]
pub async fn token(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .services
        .users
        .authenticate(&request.username, &request.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// Sign up as a regular (non-admin) user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Registered", body = TokenResponse),
        (status = 400, description = "Invalid payload or duplicate username", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let token = state.services.users.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
