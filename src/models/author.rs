//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::work::Work;

/// Author row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i32,
    /// Short mnemonic name, unique across authors (e.g. "Vergil")
    pub short_name: String,
    pub full_name: String,
}

/// Author with the works attributed to them, ordered by short title
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDetail {
    pub id: i32,
    pub short_name: String,
    pub full_name: String,
    pub works: Vec<Work>,
}

impl AuthorDetail {
    pub fn new(author: Author, works: Vec<Work>) -> Self {
        Self {
            id: author.id,
            short_name: author.short_name,
            full_name: author.full_name,
            works,
        }
    }
}

/// Author search filters
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct AuthorQuery {
    /// Case-insensitive partial match on the short name
    #[validate(length(min = 1, message = "must not be empty"))]
    pub short_name: Option<String>,
}

/// Create author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub short_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: String,
}

/// Update author request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub short_name: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: Option<String>,
}

impl UpdateAuthor {
    pub fn is_empty(&self) -> bool {
        self.short_name.is_none() && self.full_name.is_none()
    }
}
