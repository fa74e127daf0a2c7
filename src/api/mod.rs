//! API handlers for the Epic Viewer REST endpoints

pub mod auth;
pub mod authors;
pub mod health;
pub mod lines;
pub mod openapi;
pub mod reference;
pub mod users;
pub mod works;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Body of every successful delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    /// Identifier of the deleted row, as a string
    pub deleted: String,
}

/// Claims carried by a valid `Authorization: Bearer` header.
///
/// A missing, malformed or expired token leaves the caller anonymous.
fn bearer_claims(parts: &Parts, state: &AppState) -> Option<UserClaims> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    match UserClaims::from_token(token, &state.config.auth.jwt_secret) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!("Ignoring bearer token: {}", e);
            None
        }
    }
}

/// Extractor for any authenticated user
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        bearer_claims(parts, state)
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Extractor for an authenticated administrator
pub struct AdminUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)
            .ok_or_else(|| AppError::Unauthorized("Administrator privileges required".to_string()))?;
        claims.require_admin()?;
        Ok(AdminUser(claims))
    }
}

/// JSON body that is deserialized strictly and then validated
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that is deserialized strictly and then validated
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

/// Path parameters; a value of the wrong type (e.g. `/authors/abc`) is a bad request
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(PathParam(value))
    }
}

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Known paths answer unsupported methods with the same 404 as unknown paths
    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check).fallback(not_found))
        .route("/ready", get(health::readiness_check).fallback(not_found))
        // Authentication
        .route("/auth/token", post(auth::token).fallback(not_found))
        .route("/auth/register", post(auth::register).fallback(not_found))
        // Users
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .fallback(not_found),
        )
        .route(
            "/users/:username",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user)
                .fallback(not_found),
        )
        // Authors
        .route(
            "/authors",
            get(authors::list_authors)
                .post(authors::create_author)
                .fallback(not_found),
        )
        .route(
            "/authors/:id",
            get(authors::get_author)
                .patch(authors::update_author)
                .delete(authors::delete_author)
                .fallback(not_found),
        )
        // Works
        .route(
            "/works",
            get(works::list_works)
                .post(works::create_work)
                .fallback(not_found),
        )
        .route(
            "/works/:id",
            get(works::get_work)
                .patch(works::update_work)
                .delete(works::delete_work)
                .fallback(not_found),
        )
        // Lines
        .route(
            "/lines",
            get(lines::list_lines)
                .post(lines::create_line)
                .fallback(not_found),
        )
        .route(
            "/lines/:id",
            get(lines::get_line)
                .patch(lines::update_line)
                .delete(lines::delete_line)
                .fallback(not_found),
        )
        // Reference tables
        .route("/languages", get(reference::list_languages).fallback(not_found))
        .route(
            "/scan-patterns",
            get(reference::list_scan_patterns).fallback(not_found),
        )
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .merge(openapi::create_openapi_router())
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
