//! Work management service

use crate::{
    error::{AppError, AppResult},
    models::work::{CreateWork, UpdateWork, Work, WorkDetail, WorkLinesQuery, WorkQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct WorksService {
    repository: Repository,
}

impl WorksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &WorkQuery) -> AppResult<Vec<Work>> {
        self.repository.works.list(query).await
    }

    /// Work with its lines, filtered by `lines`.
    ///
    /// The line filters are checked before the work is looked up, so an
    /// inverted range fails without touching the database.
    pub async fn get(&self, id: i32, lines: WorkLinesQuery) -> AppResult<WorkDetail> {
        let line_query = lines.for_work(id);
        let line_filter = crate::repository::lines::filter_query(&line_query)?;

        let work = self.repository.works.get_by_id(id).await?;
        let lines = line_filter.fetch_all(&self.repository.pool).await?;
        Ok(WorkDetail::new(work, lines))
    }

    pub async fn create(&self, data: CreateWork) -> AppResult<Work> {
        if self
            .repository
            .works
            .exists(&data.short_title, data.author_id, None)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "Duplicate work: {}",
                data.short_title
            )));
        }

        let work = self.repository.works.create(&data).await?;
        tracing::info!(id = work.id, short_title = %work.short_title, "Work created");
        Ok(work)
    }

    /// Partial update; the duplicate check uses the work's resulting title and author
    pub async fn update(&self, id: i32, data: UpdateWork) -> AppResult<Work> {
        if data.is_empty() {
            return Err(AppError::BadRequest("No data to update".to_string()));
        }
        if data.short_title.is_some() || data.author_id.is_some() {
            let current = self.repository.works.get_by_id(id).await?;
            let short_title = data.short_title.as_deref().unwrap_or(&current.short_title);
            let author_id = data.author_id.unwrap_or(current.author_id);
            if self
                .repository
                .works
                .exists(short_title, author_id, Some(id))
                .await?
            {
                return Err(AppError::BadRequest(format!("Duplicate work: {}", short_title)));
            }
        }

        let work = self.repository.works.update(id, &data).await?;
        tracing::info!(id, "Work updated");
        Ok(work)
    }

    /// Delete a work together with its lines
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.works.delete(id).await?;
        tracing::info!(id, "Work deleted");
        Ok(())
    }
}
