//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User, UserClaims},
    repository::{users::UserChanges, Repository},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Check credentials and return a fresh token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<String> {
        let invalid = || AppError::Unauthorized("Invalid username/password".to_string());

        let user = self
            .repository
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&user.password, password)? {
            return Err(invalid());
        }

        tracing::debug!(username, "User authenticated");
        self.create_token_for(&user)
    }

    /// Self-service signup; never grants admin
    pub async fn register(&self, data: CreateUser) -> AppResult<String> {
        let user = self.create(CreateUser { is_admin: false, ..data }).await?;
        self.create_token_for(&user)
    }

    pub async fn create(&self, data: CreateUser) -> AppResult<User> {
        if self.repository.users.username_exists(&data.username).await? {
            return Err(AppError::BadRequest(format!(
                "Duplicate username: {}",
                data.username
            )));
        }

        let hash = hash_password(&data.password)?;
        let user = self.repository.users.create(&data, &hash).await?;
        tracing::info!(username = %user.username, is_admin = user.is_admin, "User created");
        Ok(user)
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get(&self, username: &str) -> AppResult<User> {
        self.repository.users.get_by_username(username).await
    }

    pub async fn update(&self, username: &str, data: UpdateUser) -> AppResult<User> {
        if data.is_empty() {
            return Err(AppError::BadRequest("No data to update".to_string()));
        }

        let password_hash = data.password.as_deref().map(hash_password).transpose()?;
        let changes = UserChanges {
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            password_hash,
        };

        let user = self.repository.users.update(username, changes).await?;
        tracing::info!(username, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, username: &str) -> AppResult<()> {
        self.repository.users.delete(username).await?;
        tracing::info!(username, "User deleted");
        Ok(())
    }

    /// Sign a token for `user`, valid for the configured number of hours
    pub fn create_token_for(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.username.clone(),
            is_admin: user.is_admin,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
