//! Reference tables

use crate::{
    error::AppResult,
    models::reference::{Language, ScansionPattern},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReferenceService {
    repository: Repository,
}

impl ReferenceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn languages(&self) -> AppResult<Vec<Language>> {
        self.repository.reference.languages().await
    }

    pub async fn scan_patterns(&self) -> AppResult<Vec<ScansionPattern>> {
        self.repository.reference.scan_patterns().await
    }
}
