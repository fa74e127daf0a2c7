//! Works repository

use sqlx::{Pool, Postgres};

use super::sql::{FilterQuery, UpdateQuery};
use crate::{
    error::{AppError, AppResult},
    models::work::{CreateWork, UpdateWork, Work, WorkQuery},
};

const WORK_SELECT: &str = "SELECT id, short_title, full_title, lang_code, author_id FROM works";
const WORK_COLUMNS: &str = "id, short_title, full_title, lang_code, author_id";

/// Build the work search.
///
/// Titles and language code are case-insensitive partial matches; the
/// author id is exact. Results are ordered by author, then short title.
pub fn filter_query(query: &WorkQuery) -> FilterQuery {
    FilterQuery::new(WORK_SELECT, "author_id, short_title, id")
        .contains("short_title", query.short_title.as_deref())
        .contains("full_title", query.full_title.as_deref())
        .contains("lang_code", query.lang_code.as_deref())
        .equals("author_id", query.author_id)
}

#[derive(Clone)]
pub struct WorksRepository {
    pool: Pool<Postgres>,
}

impl WorksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List works matching the filters
    pub async fn list(&self, query: &WorkQuery) -> AppResult<Vec<Work>> {
        filter_query(query).fetch_all(&self.pool).await
    }

    /// Works of one author, ordered by short title
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<Work>> {
        let rows = sqlx::query_as::<_, Work>(&format!(
            "{} WHERE author_id = $1 ORDER BY short_title, id",
            WORK_SELECT
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get work by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Work> {
        sqlx::query_as::<_, Work>(&format!("{} WHERE id = $1", WORK_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No work with id: {}", id)))
    }

    /// A work is a duplicate when an author already has one with the same short title
    pub async fn exists(&self, short_title: &str, author_id: i32, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM works
                WHERE short_title = $1 AND author_id = $2 AND id IS DISTINCT FROM $3
            )
            "#,
        )
        .bind(short_title)
        .bind(author_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create work
    pub async fn create(&self, data: &CreateWork) -> AppResult<Work> {
        sqlx::query_as::<_, Work>(&format!(
            r#"
            INSERT INTO works (short_title, full_title, lang_code, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            WORK_COLUMNS
        ))
        .bind(&data.short_title)
        .bind(&data.full_title)
        .bind(&data.lang_code)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &format!("work: {}", data.short_title)))
    }

    /// Update the supplied fields of a work
    pub async fn update(&self, id: i32, data: &UpdateWork) -> AppResult<Work> {
        UpdateQuery::new("works")
            .set("short_title", data.short_title.as_ref())
            .set("full_title", data.full_title.as_ref())
            .set("lang_code", data.lang_code.as_ref())
            .set("author_id", data.author_id)
            .fetch_optional(&self.pool, "id", id, WORK_COLUMNS)
            .await
            .map_err(|e| AppError::from_write(e, "work"))?
            .ok_or_else(|| AppError::NotFound(format!("No work with id: {}", id)))
    }

    /// Delete work; its lines go with it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No work with id: {}", id)));
        }
        Ok(())
    }
}
