//! Users repository for database operations

use sqlx::{Pool, Postgres};

use super::sql::UpdateQuery;
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, User},
};

const USER_COLUMNS: &str = "username, password, first_name, last_name, email, is_admin";

/// Column values for a partial user update; the password is already hashed
#[derive(Debug, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by username, if any (login path)
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No user: {}", username)))
    }

    /// All users, ordered by username
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY username",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Check if username is taken
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a user; `password_hash` replaces the plain password from the request
    pub async fn create(&self, data: &CreateUser, password_hash: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password, first_name, last_name, email, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&data.username)
        .bind(password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(data.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &format!("username: {}", data.username)))
    }

    /// Update the supplied fields of a user
    pub async fn update(&self, username: &str, changes: UserChanges) -> AppResult<User> {
        UpdateQuery::new("users")
            .set("first_name", changes.first_name)
            .set("last_name", changes.last_name)
            .set("email", changes.email)
            .set("password", changes.password_hash)
            .fetch_optional(&self.pool, "username", username, USER_COLUMNS)
            .await
            .map_err(|e| AppError::from_write(e, "user"))?
            .ok_or_else(|| AppError::NotFound(format!("No user: {}", username)))
    }

    /// Delete user
    pub async fn delete(&self, username: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No user: {}", username)));
        }
        Ok(())
    }
}
