//! Reference table endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::reference::{Language, ScansionPattern},
};

#[derive(Serialize, ToSchema)]
pub struct LanguagesResponse {
    pub languages: Vec<Language>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanPatternsResponse {
    pub scan_patterns: Vec<ScansionPattern>,
}

/// List the languages works can be written in
#[utoipa::path(
    get,
    path = "/languages",
    tag = "reference",
    responses(
        (status = 200, description = "Languages ordered by code", body = LanguagesResponse)
    )
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LanguagesResponse>> {
    let languages = state.services.reference.languages().await?;
    Ok(Json(LanguagesResponse { languages }))
}

/// List the sixteen scansion patterns
#[utoipa::path(
    get,
    path = "/scan-patterns",
    tag = "reference",
    responses(
        (status = 200, description = "Scansion patterns ordered by id", body = ScanPatternsResponse)
    )
)]
pub async fn list_scan_patterns(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ScanPatternsResponse>> {
    let scan_patterns = state.services.reference.scan_patterns().await?;
    Ok(Json(ScanPatternsResponse { scan_patterns }))
}
