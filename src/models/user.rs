//! User model, auth payloads and JWT claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// User row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing, default)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 25, message = "must be 1-25 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// Self-service signup request; registered users are never admins
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 25, message = "must be 1-25 characters"))]
    pub username: String,
    #[validate(length(min = 5, max = 72, message = "must be 5-72 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Create user request (admin only)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 25, message = "must be 1-25 characters"))]
    pub username: String,
    #[validate(length(min = 5, max = 72, message = "must be 5-72 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<RegisterUser> for CreateUser {
    fn from(user: RegisterUser) -> Self {
        Self {
            username: user.username,
            password: user.password,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_admin: false,
        }
    }
}

/// Update user request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 5, max = 72, message = "must be 5-72 characters"))]
    pub password: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaims {
    /// Username
    pub sub: String,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Administrator privileges required".to_string()))
        }
    }

    /// Require that the caller is `username` or an admin
    pub fn require_self_or_admin(&self, username: &str) -> Result<(), AppError> {
        if self.is_admin || self.sub == username {
            Ok(())
        } else {
            Err(AppError::Unauthorized(format!(
                "Not authorized to access user: {}",
                username
            )))
        }
    }
}
