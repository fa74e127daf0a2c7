//! Error types for Epic Viewer server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Postgres SQLSTATE codes the write paths translate into client errors
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify an error raised by an INSERT/UPDATE.
    ///
    /// Constraint violations are the caller's fault and surface as 400s; the
    /// storage-level unique constraints back up the duplicate checks done in
    /// the services when two identical creates race.
    pub fn from_write(err: sqlx::Error, what: &str) -> Self {
        let classified = err.as_database_error().and_then(|db| {
            let constraint = db.constraint().unwrap_or("unknown").to_string();
            match db.code().as_deref() {
                Some(UNIQUE_VIOLATION) => Some(AppError::BadRequest(format!("Duplicate {}", what))),
                Some(FOREIGN_KEY_VIOLATION) => Some(AppError::BadRequest(format!(
                    "Invalid reference for {} ({})",
                    what, constraint
                ))),
                Some(CHECK_VIOLATION) => Some(AppError::BadRequest(format!(
                    "Invalid value for {} ({})",
                    what, constraint
                ))),
                _ => None,
            }
        });
        classified.unwrap_or(AppError::Database(err))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = camel_case(&field);
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: failed '{}' check", field, e.code),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages)
    }
}

/// `line_text` -> `lineText`, the name clients send
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Error message: a single string, or the list of schema violations
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: ErrorMessage,
    pub status: u16,
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::BadRequest(msg) | AppError::Unauthorized(msg) | AppError::NotFound(msg) => {
                tracing::debug!(status = status.as_u16(), "{}", msg);
                ErrorMessage::One(msg)
            }
            AppError::Validation(msgs) => {
                tracing::debug!(status = status.as_u16(), "Validation failed: {:?}", msgs);
                ErrorMessage::Many(msgs)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ErrorMessage::One("Database error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorMessage::One("Internal server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorBody {
                message,
                status: status.as_u16(),
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
