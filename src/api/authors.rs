//! Author endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::author::{Author, AuthorDetail, AuthorQuery, CreateAuthor, UpdateAuthor},
};

use super::{AdminUser, DeletedResponse, PathParam, ValidatedJson, ValidatedQuery};

#[derive(Serialize, ToSchema)]
pub struct AuthorResponse {
    pub author: Author,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorDetailResponse {
    pub author: AuthorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorListResponse {
    pub authors: Vec<Author>,
}

/// List authors, optionally filtered by short name
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(AuthorQuery),
    responses(
        (status = 200, description = "Authors ordered by short name", body = AuthorListResponse),
        (status = 400, description = "Unknown or invalid filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    ValidatedQuery(query): ValidatedQuery<AuthorQuery>,
) -> AppResult<Json<AuthorListResponse>> {
    let authors = state.services.authors.list(&query).await?;
    Ok(Json(AuthorListResponse { authors }))
}

/// Get an author and their works
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author with works", body = AuthorDetailResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<AuthorDetailResponse>> {
    let author = state.services.authors.get(id).await?;
    Ok(Json(AuthorDetailResponse { author }))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Invalid payload or duplicate", body = crate::error::ErrorResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    ValidatedJson(data): ValidatedJson<CreateAuthor>,
) -> AppResult<(StatusCode, Json<AuthorResponse>)> {
    let author = state.services.authors.create(data).await?;
    Ok((StatusCode::CREATED, Json(AuthorResponse { author })))
}

/// Update an author
#[utoipa::path(
    patch,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 400, description = "Invalid or empty payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    PathParam(id): PathParam<i32>,
    ValidatedJson(data): ValidatedJson<UpdateAuthor>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors.update(id, data).await?;
    Ok(Json(AuthorResponse { author }))
}

/// Delete an author, their works and those works' lines
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author deleted", body = DeletedResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<DeletedResponse>> {
    state.services.authors.delete(id).await?;
    Ok(Json(DeletedResponse {
        deleted: id.to_string(),
    }))
}
