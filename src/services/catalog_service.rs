//! Catalog service - Public listing and provider-side service management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewService, Service, ServiceFilter, ServiceUpdate};
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List active services matching the public filter
    async fn list_services(&self, filter: ServiceFilter) -> AppResult<Vec<Service>>;

    /// Get one service by ID
    async fn get_service(&self, id: i32) -> AppResult<Service>;

    /// Distinct categories across active services
    async fn list_categories(&self) -> AppResult<Vec<String>>;

    /// List all of a provider's own services, including inactive ones
    async fn list_provider_services(&self, provider_id: i32) -> AppResult<Vec<Service>>;

    /// Create a service owned by `new.provider_id`
    async fn create_service(&self, new: NewService) -> AppResult<Service>;

    /// Update a service owned by `provider_id`
    async fn update_service(
        &self,
        id: i32,
        provider_id: i32,
        changes: ServiceUpdate,
    ) -> AppResult<Service>;

    /// Deactivate a service owned by `provider_id` (removal is a flag)
    async fn deactivate_service(&self, id: i32, provider_id: i32) -> AppResult<Service>;
}

/// Concrete implementation of `CatalogService`.
pub struct Catalog<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> Catalog<R> {
    /// Create new catalog service instance
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl<R: Repositories> CatalogService for Catalog<R> {
    async fn list_services(&self, filter: ServiceFilter) -> AppResult<Vec<Service>> {
        self.repos.services().list_public(filter).await
    }

    async fn get_service(&self, id: i32) -> AppResult<Service> {
        self.repos
            .services()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_categories(&self) -> AppResult<Vec<String>> {
        self.repos.services().list_categories().await
    }

    async fn list_provider_services(&self, provider_id: i32) -> AppResult<Vec<Service>> {
        self.repos.services().list_by_provider(provider_id).await
    }

    async fn create_service(&self, new: NewService) -> AppResult<Service> {
        if new.price < 0.0 {
            return Err(AppError::validation("Price must be non-negative"));
        }
        self.repos.services().create(new).await
    }

    async fn update_service(
        &self,
        id: i32,
        provider_id: i32,
        changes: ServiceUpdate,
    ) -> AppResult<Service> {
        if matches!(changes.price, Some(price) if price < 0.0) {
            return Err(AppError::validation("Price must be non-negative"));
        }
        self.repos.services().update(id, provider_id, changes).await
    }

    async fn deactivate_service(&self, id: i32, provider_id: i32) -> AppResult<Service> {
        self.repos.services().set_active(id, provider_id, false).await
    }
}
