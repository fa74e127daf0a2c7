//! Static reference tables: languages and scansion patterns

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Language catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub lang_code: String,
    pub name: String,
}

/// One of the sixteen dactyl/spondee patterns of the first four feet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScansionPattern {
    pub id: i32,
    /// Four characters over {D, S}
    pub pattern: String,
}
