//! Line model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Line as shown in list and detail views, with the scansion resolved to its pattern string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: i32,
    /// Position within the book
    pub line_num: i32,
    pub line_text: String,
    /// Scansion of the first four feet, e.g. "DDSS"
    pub scan_pattern: Option<String>,
    pub fifth_foot_spondee: bool,
    pub book_num: i32,
    pub work_id: i32,
}

/// Line as stored, returned by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub id: i32,
    pub line_num: i32,
    pub line_text: String,
    pub scan_pattern_id: Option<i32>,
    pub fifth_foot_spondee: bool,
    pub book_num: i32,
    pub work_id: i32,
}

/// Line search filters. Ranges are inclusive.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct LineQuery {
    pub min_line_num: Option<i32>,
    pub max_line_num: Option<i32>,
    /// Case-insensitive partial match on the verse text
    #[validate(length(min = 1, message = "must not be empty"))]
    pub line_text: Option<String>,
    /// Case-insensitive partial match on the pattern string (not the pattern id)
    #[validate(length(min = 1, message = "must not be empty"))]
    pub scan_pattern: Option<String>,
    pub fifth_foot_spondee: Option<bool>,
    pub min_book_num: Option<i32>,
    pub max_book_num: Option<i32>,
    pub work_id: Option<i32>,
}

/// Create line request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLine {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub line_num: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub line_text: String,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub scan_pattern_id: Option<i32>,
    #[serde(default)]
    pub fifth_foot_spondee: bool,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub book_num: i32,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub work_id: i32,
}

/// Update line request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateLine {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub line_num: Option<i32>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub line_text: Option<String>,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub scan_pattern_id: Option<i32>,
    pub fifth_foot_spondee: Option<bool>,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub book_num: Option<i32>,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub work_id: Option<i32>,
}

impl UpdateLine {
    pub fn is_empty(&self) -> bool {
        self.line_num.is_none()
            && self.line_text.is_none()
            && self.scan_pattern_id.is_none()
            && self.fifth_foot_spondee.is_none()
            && self.book_num.is_none()
            && self.work_id.is_none()
    }
}
