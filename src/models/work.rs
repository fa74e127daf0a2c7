//! Work model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::line::{Line, LineQuery};

/// Work row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: i32,
    pub short_title: String,
    pub full_title: String,
    /// Language catalog code (e.g. "LAT")
    pub lang_code: String,
    pub author_id: i32,
}

/// Work with its (optionally filtered) lines
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkDetail {
    pub id: i32,
    pub short_title: String,
    pub full_title: String,
    pub lang_code: String,
    pub author_id: i32,
    pub lines: Vec<Line>,
}

impl WorkDetail {
    pub fn new(work: Work, lines: Vec<Line>) -> Self {
        Self {
            id: work.id,
            short_title: work.short_title,
            full_title: work.full_title,
            lang_code: work.lang_code,
            author_id: work.author_id,
            lines,
        }
    }
}

/// Work search filters
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct WorkQuery {
    /// Case-insensitive partial match
    #[validate(length(min = 1, message = "must not be empty"))]
    pub short_title: Option<String>,
    /// Case-insensitive partial match
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_title: Option<String>,
    /// Case-insensitive partial match
    #[validate(length(min = 1, message = "must not be empty"))]
    pub lang_code: Option<String>,
    pub author_id: Option<i32>,
}

/// Line filters accepted by `GET /works/{id}`; the work id is implied
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct WorkLinesQuery {
    pub min_line_num: Option<i32>,
    pub max_line_num: Option<i32>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub line_text: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub scan_pattern: Option<String>,
    pub fifth_foot_spondee: Option<bool>,
    pub min_book_num: Option<i32>,
    pub max_book_num: Option<i32>,
}

impl WorkLinesQuery {
    pub fn for_work(self, work_id: i32) -> LineQuery {
        LineQuery {
            min_line_num: self.min_line_num,
            max_line_num: self.max_line_num,
            line_text: self.line_text,
            scan_pattern: self.scan_pattern,
            fifth_foot_spondee: self.fifth_foot_spondee,
            min_book_num: self.min_book_num,
            max_book_num: self.max_book_num,
            work_id: Some(work_id),
        }
    }
}

/// Create work request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateWork {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub short_title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_title: String,
    #[validate(length(min = 1, max = 3, message = "must be 1-3 characters"))]
    pub lang_code: String,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub author_id: i32,
}

/// Update work request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateWork {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub short_title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_title: Option<String>,
    #[validate(length(min = 1, max = 3, message = "must be 1-3 characters"))]
    pub lang_code: Option<String>,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub author_id: Option<i32>,
}

impl UpdateWork {
    pub fn is_empty(&self) -> bool {
        self.short_title.is_none()
            && self.full_title.is_none()
            && self.lang_code.is_none()
            && self.author_id.is_none()
    }
}
