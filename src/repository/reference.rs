//! Read-only reference data: languages and scansion patterns

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::reference::{Language, ScansionPattern},
};

#[derive(Clone)]
pub struct ReferenceRepository {
    pool: Pool<Postgres>,
}

impl ReferenceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn languages(&self) -> AppResult<Vec<Language>> {
        let rows = sqlx::query_as::<_, Language>(
            "SELECT lang_code, name FROM languages ORDER BY lang_code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn scan_patterns(&self) -> AppResult<Vec<ScansionPattern>> {
        let rows = sqlx::query_as::<_, ScansionPattern>(
            "SELECT id, pattern FROM scansion_patterns ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
