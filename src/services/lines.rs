//! Line management service

use crate::{
    error::{AppError, AppResult},
    models::line::{CreateLine, Line, LineQuery, LineRecord, UpdateLine},
    repository::Repository,
};

#[derive(Clone)]
pub struct LinesService {
    repository: Repository,
}

impl LinesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &LineQuery) -> AppResult<Vec<Line>> {
        self.repository.lines.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Line> {
        self.repository.lines.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateLine) -> AppResult<LineRecord> {
        if self
            .repository
            .lines
            .exists(data.line_num, &data.line_text, data.work_id, None)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "Duplicate line: {} {}",
                data.line_num, data.line_text
            )));
        }

        let line = self.repository.lines.create(&data).await?;
        tracing::info!(id = line.id, work_id = line.work_id, "Line created");
        Ok(line)
    }

    /// Partial update; the duplicate check uses the line's resulting number, text and work
    pub async fn update(&self, id: i32, data: UpdateLine) -> AppResult<LineRecord> {
        if data.is_empty() {
            return Err(AppError::BadRequest("No data to update".to_string()));
        }
        if data.line_num.is_some() || data.line_text.is_some() || data.work_id.is_some() {
            let current = self.repository.lines.get_record(id).await?;
            let line_num = data.line_num.unwrap_or(current.line_num);
            let line_text = data.line_text.as_deref().unwrap_or(&current.line_text);
            let work_id = data.work_id.unwrap_or(current.work_id);
            if self
                .repository
                .lines
                .exists(line_num, line_text, work_id, Some(id))
                .await?
            {
                return Err(AppError::BadRequest(format!(
                    "Duplicate line: {} {}",
                    line_num, line_text
                )));
            }
        }

        let line = self.repository.lines.update(id, &data).await?;
        tracing::info!(id, "Line updated");
        Ok(line)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.lines.delete(id).await?;
        tracing::info!(id, "Line deleted");
        Ok(())
    }
}
