//! Line endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::line::{CreateLine, Line, LineQuery, LineRecord, UpdateLine},
};

use super::{AdminUser, DeletedResponse, PathParam, ValidatedJson, ValidatedQuery};

#[derive(Serialize, ToSchema)]
pub struct LineResponse {
    pub line: Line,
}

/// Create/update result, carrying the raw `scanPatternId`
#[derive(Serialize, ToSchema)]
pub struct LineRecordResponse {
    pub line: LineRecord,
}

#[derive(Serialize, ToSchema)]
pub struct LineListResponse {
    pub lines: Vec<Line>,
}

/// Search lines.
///
/// Every filter is optional and they combine with AND. `minX > maxX` on
/// either range is rejected before the database is queried.
#[utoipa::path(
    get,
    path = "/lines",
    tag = "lines",
    params(LineQuery),
    responses(
        (status = 200, description = "Lines ordered by work, book, line number", body = LineListResponse),
        (status = 400, description = "Unknown filter or inverted range", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_lines(
    State(state): State<crate::AppState>,
    ValidatedQuery(query): ValidatedQuery<LineQuery>,
) -> AppResult<Json<LineListResponse>> {
    let lines = state.services.lines.list(&query).await?;
    Ok(Json(LineListResponse { lines }))
}

/// Get a line with its scansion pattern
#[utoipa::path(
    get,
    path = "/lines/{id}",
    tag = "lines",
    params(("id" = i32, Path, description = "Line ID")),
    responses(
        (status = 200, description = "Line", body = LineResponse),
        (status = 404, description = "Line not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_line(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<LineResponse>> {
    let line = state.services.lines.get(id).await?;
    Ok(Json(LineResponse { line }))
}

/// Create a line
#[utoipa::path(
    post,
    path = "/lines",
    tag = "lines",
    security(("bearer_auth" = [])),
    request_body = CreateLine,
    responses(
        (status = 201, description = "Line created", body = LineRecordResponse),
        (status = 400, description = "Invalid payload, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_line(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    ValidatedJson(data): ValidatedJson<CreateLine>,
) -> AppResult<(StatusCode, Json<LineRecordResponse>)> {
    let line = state.services.lines.create(data).await?;
    Ok((StatusCode::CREATED, Json(LineRecordResponse { line })))
}

/// Update a line
#[utoipa::path(
    patch,
    path = "/lines/{id}",
    tag = "lines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Line ID")),
    request_body = UpdateLine,
    responses(
        (status = 200, description = "Line updated", body = LineRecordResponse),
        (status = 400, description = "Invalid or empty payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse),
        (status = 404, description = "Line not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_line(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    PathParam(id): PathParam<i32>,
    ValidatedJson(data): ValidatedJson<UpdateLine>,
) -> AppResult<Json<LineRecordResponse>> {
    let line = state.services.lines.update(id, data).await?;
    Ok(Json(LineRecordResponse { line }))
}

/// Delete a line
#[utoipa::path(
    delete,
    path = "/lines/{id}",
    tag = "lines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Line ID")),
    responses(
        (status = 200, description = "Line deleted", body = DeletedResponse),
        (status = 401, description = "Administrator privileges required", body = crate::error::ErrorResponse),
        (status = 404, description = "Line not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_line(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<DeletedResponse>> {
    state.services.lines.delete(id).await?;
    Ok(Json(DeletedResponse {
        deleted: id.to_string(),
    }))
}
