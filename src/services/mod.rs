//! Business logic services

pub mod authors;
pub mod lines;
pub mod reference;
pub mod users;
pub mod works;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub works: works::WorksService,
    pub lines: lines::LinesService,
    pub reference: reference::ReferenceService,
    pub users: users::UsersService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            works: works::WorksService::new(repository.clone()),
            lines: lines::LinesService::new(repository.clone()),
            reference: reference::ReferenceService::new(repository.clone()),
            users: users::UsersService::new(repository.clone(), auth_config),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
