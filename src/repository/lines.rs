//! Lines repository

use sqlx::{Pool, Postgres};

use super::sql::{check_range, FilterQuery, UpdateQuery};
use crate::{
    error::{AppError, AppResult},
    models::line::{CreateLine, Line, LineQuery, LineRecord, UpdateLine},
};

/// Lines joined with their scansion pattern string
const LINE_SELECT: &str = r#"
    SELECT l.id, l.line_num, l.line_text, sp.pattern AS scan_pattern,
           l.fifth_foot_spondee, l.book_num, l.work_id
    FROM lines AS l
    LEFT JOIN scansion_patterns AS sp ON sp.id = l.scan_pattern_id"#;

const LINE_RECORD_COLUMNS: &str =
    "id, line_num, line_text, scan_pattern_id, fifth_foot_spondee, book_num, work_id";

/// Build the line search.
///
/// Range bounds are checked before anything else, so an inverted range never
/// reaches the database whatever other filters accompany it.
pub fn filter_query(query: &LineQuery) -> AppResult<FilterQuery> {
    check_range("LineNum", query.min_line_num, query.max_line_num)?;
    check_range("BookNum", query.min_book_num, query.max_book_num)?;

    Ok(FilterQuery::new(LINE_SELECT, "l.work_id, l.book_num, l.line_num, l.id")
        .at_least("l.line_num", query.min_line_num)
        .at_most("l.line_num", query.max_line_num)
        .contains("l.line_text", query.line_text.as_deref())
        .contains("sp.pattern", query.scan_pattern.as_deref())
        .equals("l.fifth_foot_spondee", query.fifth_foot_spondee)
        .at_least("l.book_num", query.min_book_num)
        .at_most("l.book_num", query.max_book_num)
        .equals("l.work_id", query.work_id))
}

#[derive(Clone)]
pub struct LinesRepository {
    pool: Pool<Postgres>,
}

impl LinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List lines matching the filters, ordered by work, book, line number
    pub async fn list(&self, query: &LineQuery) -> AppResult<Vec<Line>> {
        filter_query(query)?.fetch_all(&self.pool).await
    }

    /// Get line by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Line> {
        sqlx::query_as::<_, Line>(&format!("{} WHERE l.id = $1", LINE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No line with id: {}", id)))
    }

    /// A line is a duplicate when its work already holds the same number and text
    pub async fn exists(
        &self,
        line_num: i32,
        line_text: &str,
        work_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM lines
                WHERE line_num = $1 AND line_text = $2 AND work_id = $3
                  AND id IS DISTINCT FROM $4
            )
            "#,
        )
        .bind(line_num)
        .bind(line_text)
        .bind(work_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Get the stored row (raw scansion id) by ID
    pub async fn get_record(&self, id: i32) -> AppResult<LineRecord> {
        sqlx::query_as::<_, LineRecord>(&format!(
            "SELECT {} FROM lines WHERE id = $1",
            LINE_RECORD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No line with id: {}", id)))
    }

    /// Create line
    pub async fn create(&self, data: &CreateLine) -> AppResult<LineRecord> {
        sqlx::query_as::<_, LineRecord>(&format!(
            r#"
            INSERT INTO lines (line_num, line_text, scan_pattern_id, fifth_foot_spondee, book_num, work_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            LINE_RECORD_COLUMNS
        ))
        .bind(data.line_num)
        .bind(&data.line_text)
        .bind(data.scan_pattern_id)
        .bind(data.fifth_foot_spondee)
        .bind(data.book_num)
        .bind(data.work_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "line"))
    }

    /// Update the supplied fields of a line
    pub async fn update(&self, id: i32, data: &UpdateLine) -> AppResult<LineRecord> {
        UpdateQuery::new("lines")
            .set("line_num", data.line_num)
            .set("line_text", data.line_text.as_ref())
            .set("scan_pattern_id", data.scan_pattern_id)
            .set("fifth_foot_spondee", data.fifth_foot_spondee)
            .set("book_num", data.book_num)
            .set("work_id", data.work_id)
            .fetch_optional(&self.pool, "id", id, LINE_RECORD_COLUMNS)
            .await
            .map_err(|e| AppError::from_write(e, "line"))?
            .ok_or_else(|| AppError::NotFound(format!("No line with id: {}", id)))
    }

    /// Delete line
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM lines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No line with id: {}", id)));
        }
        Ok(())
    }
}
