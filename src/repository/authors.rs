//! Authors repository

use sqlx::{Pool, Postgres};

use super::sql::{FilterQuery, UpdateQuery};
use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
};

const AUTHOR_SELECT: &str = "SELECT id, short_name, full_name FROM authors";
const AUTHOR_COLUMNS: &str = "id, short_name, full_name";

/// Build the author search: `shortName` is a case-insensitive partial match
pub fn filter_query(query: &AuthorQuery) -> FilterQuery {
    FilterQuery::new(AUTHOR_SELECT, "short_name, id")
        .contains("short_name", query.short_name.as_deref())
}

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List authors matching the filters, ordered by short name
    pub async fn list(&self, query: &AuthorQuery) -> AppResult<Vec<Author>> {
        filter_query(query).fetch_all(&self.pool).await
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!("{} WHERE id = $1", AUTHOR_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No author with id: {}", id)))
    }

    /// Check whether a short name is taken, optionally ignoring one author
    pub async fn short_name_exists(&self, short_name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE short_name = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(short_name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create author
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            "INSERT INTO authors (short_name, full_name) VALUES ($1, $2) RETURNING {}",
            AUTHOR_COLUMNS
        ))
        .bind(&data.short_name)
        .bind(&data.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &format!("author: {}", data.short_name)))
    }

    /// Update the supplied fields of an author
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        UpdateQuery::new("authors")
            .set("short_name", data.short_name.as_ref())
            .set("full_name", data.full_name.as_ref())
            .fetch_optional(&self.pool, "id", id, AUTHOR_COLUMNS)
            .await
            .map_err(|e| AppError::from_write(e, "author"))?
            .ok_or_else(|| AppError::NotFound(format!("No author with id: {}", id)))
    }

    /// Delete author; their works and lines go with them
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No author with id: {}", id)));
        }
        Ok(())
    }
}
