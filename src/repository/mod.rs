//! Repository layer for database operations

pub mod authors;
pub mod lines;
pub mod reference;
pub mod sql;
pub mod users;
pub mod works;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub works: works::WorksRepository,
    pub lines: lines::LinesRepository,
    pub reference: reference::ReferenceRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            works: works::WorksRepository::new(pool.clone()),
            lines: lines::LinesRepository::new(pool.clone()),
            reference: reference::ReferenceRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
