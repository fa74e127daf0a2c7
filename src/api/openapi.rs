//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, health, lines, reference, users, works};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Epic Viewer API",
        version = "1.0.0",
        description = "Catalog of classical verse: authors, works, lines and their scansion",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::token,
        auth::register,
        // Users
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Works
        works::list_works,
        works::get_work,
        works::create_work,
        works::update_work,
        works::delete_work,
        // Lines
        lines::list_lines,
        lines::get_line,
        lines::create_line,
        lines::update_line,
        lines::delete_line,
        // Reference
        reference::list_languages,
        reference::list_scan_patterns,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::RegisterUser,
            auth::TokenResponse,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            users::UserResponse,
            users::UserListResponse,
            users::UserCreatedResponse,
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorDetail,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            authors::AuthorResponse,
            authors::AuthorDetailResponse,
            authors::AuthorListResponse,
            // Works
            crate::models::work::Work,
            crate::models::work::WorkDetail,
            crate::models::work::CreateWork,
            crate::models::work::UpdateWork,
            works::WorkResponse,
            works::WorkDetailResponse,
            works::WorkListResponse,
            // Lines
            crate::models::line::Line,
            crate::models::line::LineRecord,
            crate::models::line::CreateLine,
            crate::models::line::UpdateLine,
            lines::LineResponse,
            lines::LineRecordResponse,
            lines::LineListResponse,
            // Reference
            crate::models::reference::Language,
            crate::models::reference::ScansionPattern,
            reference::LanguagesResponse,
            reference::ScanPatternsResponse,
            // Common
            crate::api::DeletedResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::error::ErrorBody,
            crate::error::ErrorMessage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "authors", description = "Authors"),
        (name = "works", description = "Works and their lines"),
        (name = "lines", description = "Verse lines and scansion search"),
        (name = "reference", description = "Languages and scansion patterns")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the admin routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
