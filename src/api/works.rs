//! Work endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::work::{CreateWork, UpdateWork, Work, WorkDetail, WorkLinesQuery, WorkQuery},
};

use super::{AdminUser, DeletedResponse, PathParam, ValidatedJson, ValidatedQuery};

#[derive(Serialize, ToSchema)]
pub struct WorkResponse {
    pub work: Work,
}

#[derive(Serialize, ToSchema)]
pub struct WorkDetailResponse {
    pub work: WorkDetail,
}

#[derive(Serialize, ToSchema)]
pub struct WorkListResponse {
    pub works: Vec<Work>,
}

/// List works matching every supplied filter
#[utoipa::path(
    get,
    path = "/works",
    tag = "works",
    params(WorkQuery),
    responses(
        (status = 200, description = "Works ordered by author, then short title", body = WorkListResponse),
        (status = 400, description = "Unknown or invalid filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_works(
    State(state): State<crate::AppState>,
    ValidatedQuery(query): ValidatedQuery<WorkQuery>,
) -> AppResult<Json<WorkListResponse>> {
    let works = state.services.works.list(&query).await?;
    Ok(Json(WorkListResponse { works }))
}

/// Get a work and its lines, optionally narrowed by line filters
#[utoipa::path(
    get,
    path = "/works/{id}",
    tag = "works",
    params(("id" = i32, Path, description = "Work ID"), WorkLinesQuery),
    responses(
        (status = 200, description = "Work with lines", body = WorkDetailResponse),
        (status = 400, description = "Unknown filter or inverted range", body = crate::error::ErrorResponse),
        (status = 404, description = "Work not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_work(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<i32>,
    ValidatedQuery(query): ValidatedQuery<WorkLinesQuery>,
) -> AppResult<Json<WorkDetailResponse>> {
    let work = state.services.works.get(id, query).await?;
    Ok(Json(WorkDetailResponse { work }))
}

/// Create a work
#[utoipa::path(
    post,
    path = "/works",
    tag = "works",
    security(("bearer_auth" = [])),
    request_body = CreateWork,
    responses(
        (status = 201, description = "Work created", body = WorkResponse),
        (status = 400, description = "Invalid payload, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_work(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    ValidatedJson(data): ValidatedJson<CreateWork>,
) -> AppResult<(StatusCode, Json<WorkResponse>)> {
    let work = state.services.works.create(data).await?;
    Ok((StatusCode::CREATED, Json(WorkResponse { work })))
}

/// Update a work
#[utoipa::path(
    patch,
    path = "/works/{id}",
    tag = "works",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Work ID")),
    request_body = UpdateWork,
    responses(
        (status = 200, description = "Work updated", body = WorkResponse),
        (status = 400, description = "Invalid or empty payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse),
        (status = 404, description = "Work not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_work(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    PathParam(id): PathParam<i32>,
    ValidatedJson(data): ValidatedJson<UpdateWork>,
) -> AppResult<Json<WorkResponse>> {
    let work = state.services.works.update(id, data).await?;
    Ok(Json(WorkResponse { work }))
}

/// Delete a work and its lines
#[utoipa::path(
    delete,
    path = "/works/{id}",
    tag = "works",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Work ID")),
    responses(
        (status = 200, description = "Work deleted", body = DeletedResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse),
        (status = 404, description = "Work not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_work(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<DeletedResponse>> {
    state.services.works.delete(id).await?;
    Ok(Json(DeletedResponse {
        deleted: id.to_string(),
    }))
}
