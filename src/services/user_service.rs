//! User service - Profile read and update use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{ProfileUpdate, User};
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user by ID
    async fn get_profile(&self, id: i32) -> AppResult<User>;

    /// Apply profile changes for the owning identity.
    ///
    /// Provider-only fields are dropped for non-provider accounts.
    async fn update_profile(&self, id: i32, changes: ProfileUpdate) -> AppResult<User>;
}

/// Concrete implementation of `UserService`.
pub struct UserManager<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> UserManager<R> {
    /// Create new user service instance
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl<R: Repositories> UserService for UserManager<R> {
    async fn get_profile(&self, id: i32) -> AppResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_profile(&self, id: i32, changes: ProfileUpdate) -> AppResult<User> {
        self.repos.users().update_profile(id, changes).await
    }
}
