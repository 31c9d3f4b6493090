//! Service catalog repository - SeaORM-backed access to listings.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::service::{self, Entity as ServiceEntity};
use crate::domain::{NewService, Service, ServiceFilter, ServiceSort, ServiceUpdate};
use crate::errors::{AppError, AppResult};

/// Service repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Find service by ID (active or not)
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>>;

    /// List active services matching a public catalog filter
    async fn list_public(&self, filter: ServiceFilter) -> AppResult<Vec<Service>>;

    /// List every service owned by a provider, including inactive ones
    async fn list_by_provider(&self, provider_id: i32) -> AppResult<Vec<Service>>;

    /// Distinct categories across active services
    async fn list_categories(&self) -> AppResult<Vec<String>>;

    /// Insert a new service
    async fn create(&self, service: NewService) -> AppResult<Service>;

    /// Update a service owned by `provider_id`; `NotFound` if not owned
    async fn update(
        &self,
        id: i32,
        provider_id: i32,
        changes: ServiceUpdate,
    ) -> AppResult<Service>;

    /// Flip the active flag on a service owned by `provider_id`
    async fn set_active(&self, id: i32, provider_id: i32, active: bool) -> AppResult<Service>;
}

/// Concrete SeaORM implementation of `ServiceRepository`.
pub struct ServiceStore {
    db: DatabaseConnection,
}

impl ServiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_owned(&self, id: i32, provider_id: i32) -> AppResult<service::Model> {
        ServiceEntity::find_by_id(id)
            .filter(service::Column::ProviderId.eq(provider_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl ServiceRepository for ServiceStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        let result = ServiceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Service::from))
    }

    async fn list_public(&self, filter: ServiceFilter) -> AppResult<Vec<Service>> {
        let mut query = ServiceEntity::find().filter(service::Column::IsActive.eq(true));

        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(service::Column::Title.contains(search))
                    .add(service::Column::Category.contains(search))
                    .add(service::Column::Description.contains(search)),
            );
        }
        if let Some(category) = &filter.category {
            query = query.filter(service::Column::Category.eq(category));
        }
        if let Some(min_price) = filter.min_price {
            query = query.filter(service::Column::Price.gte(min_price));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(service::Column::Price.lte(max_price));
        }
        if let Some(min_rating) = filter.min_rating {
            query = query.filter(service::Column::Rating.gte(min_rating));
        }

        query = match filter.sort {
            Some(ServiceSort::PriceLow) => query.order_by_asc(service::Column::Price),
            Some(ServiceSort::PriceHigh) => query.order_by_desc(service::Column::Price),
            Some(ServiceSort::Rating) => query.order_by_desc(service::Column::Rating),
            None => query.order_by_desc(service::Column::CreatedAt),
        };

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(Service::from).collect())
    }

    async fn list_by_provider(&self, provider_id: i32) -> AppResult<Vec<Service>> {
        let models = ServiceEntity::find()
            .filter(service::Column::ProviderId.eq(provider_id))
            .order_by_desc(service::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Service::from).collect())
    }

    async fn list_categories(&self) -> AppResult<Vec<String>> {
        let categories = ServiceEntity::find()
            .select_only()
            .column(service::Column::Category)
            .filter(service::Column::IsActive.eq(true))
            .distinct()
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(categories)
    }

    async fn create(&self, new: NewService) -> AppResult<Service> {
        let now = chrono::Utc::now();
        let active = service::ActiveModel {
            provider_id: Set(new.provider_id),
            title: Set(new.title),
            category: Set(new.category),
            description: Set(new.description),
            price: Set(new.price),
            image: Set(new.image),
            rating: Set(0.0),
            review_count: Set(0),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Service::from(model))
    }

    async fn update(
        &self,
        id: i32,
        provider_id: i32,
        changes: ServiceUpdate,
    ) -> AppResult<Service> {
        let model = self.find_owned(id, provider_id).await?;
        let mut active: service::ActiveModel = model.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(image) = changes.image {
            active.image = Set(Some(image));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Service::from(model))
    }

    async fn set_active(&self, id: i32, provider_id: i32, active: bool) -> AppResult<Service> {
        let model = self.find_owned(id, provider_id).await?;
        let mut model: service::ActiveModel = model.into();

        model.is_active = Set(active);
        model.updated_at = Set(chrono::Utc::now());

        let model = model.update(&self.db).await.map_err(AppError::from)?;

        Ok(Service::from(model))
    }
}
