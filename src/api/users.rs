//! User management endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, User},
};

use super::{AdminUser, AuthenticatedUser, DeletedResponse, PathParam, ValidatedJson};

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

#[derive(Serialize, ToSchema)]
pub struct UserCreatedResponse {
    pub user: User,
    /// Token for the new user
    pub token: String,
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users ordered by username", body = UserListResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<UserListResponse>> {
    let users = state.services.users.list().await?;
    Ok(Json(UserListResponse { users }))
}

/// Create a user, possibly an administrator
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserCreatedResponse),
        (status = 400, description = "Invalid payload or duplicate username", body = crate::error::ErrorResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    ValidatedJson(data): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<UserCreatedResponse>)> {
    let user = state.services.users.create(data).await?;
    let token = state.services.users.create_token_for(&user)?;
    Ok((StatusCode::CREATED, Json(UserCreatedResponse { user, token })))
}

/// Get a user
#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Not that user nor an administrator", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    PathParam(username): PathParam<String>,
) -> AppResult<Json<UserResponse>> {
    claims.require_self_or_admin(&username)?;

    let user = state.services.users.get(&username).await?;
    Ok(Json(UserResponse { user }))
}

/// Update a user's name, email or password
#[utoipa::path(
    patch,
    path = "/users/{username}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid or empty payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Not that user nor an administrator", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    PathParam(username): PathParam<String>,
    ValidatedJson(data): ValidatedJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    claims.require_self_or_admin(&username)?;

    let user = state.services.users.update(&username, data).await?;
    Ok(Json(UserResponse { user }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{username}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 401, description = "Not that user nor an administrator", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    PathParam(username): PathParam<String>,
) -> AppResult<Json<DeletedResponse>> {
    claims.require_self_or_admin(&username)?;

    state.services.users.delete(&username).await?;
    Ok(Json(DeletedResponse { deleted: username }))
}
