//! Author management service

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorDetail, AuthorQuery, CreateAuthor, UpdateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &AuthorQuery) -> AppResult<Vec<Author>> {
        self.repository.authors.list(query).await
    }

    /// Author with their works; the author must exist before works are fetched
    pub async fn get(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.authors.get_by_id(id).await?;
        let works = self.repository.works.list_by_author(id).await?;
        Ok(AuthorDetail::new(author, works))
    }

    pub async fn create(&self, data: CreateAuthor) -> AppResult<Author> {
        if self
            .repository
            .authors
            .short_name_exists(&data.short_name, None)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "Duplicate author: {}",
                data.short_name
            )));
        }

        let author = self.repository.authors.create(&data).await?;
        tracing::info!(id = author.id, short_name = %author.short_name, "Author created");
        Ok(author)
    }

    pub async fn update(&self, id: i32, data: UpdateAuthor) -> AppResult<Author> {
        if data.is_empty() {
            return Err(AppError::BadRequest("No data to update".to_string()));
        }

        if let Some(ref short_name) = data.short_name {
            self.repository.authors.get_by_id(id).await?;
            if self
                .repository
                .authors
                .short_name_exists(short_name, Some(id))
                .await?
            {
                return Err(AppError::BadRequest(format!(
                    "Duplicate author: {}",
                    short_name
                )));
            }
        }

        let author = self.repository.authors.update(id, &data).await?;
        tracing::info!(id, "Author updated");
        Ok(author)
    }

    /// Delete an author together with their works and lines
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!(id, "Author deleted");
        Ok(())
    }
}
