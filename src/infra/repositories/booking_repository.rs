//! Booking repository - SeaORM-backed access to reservations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::booking::{self, Entity as BookingEntity};
use crate::config::PAYMENT_STATUS_PENDING;
use crate::domain::{Booking, BookingStatus, NewBooking};
use crate::errors::{AppError, AppResult};

/// Booking repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>>;

    /// List bookings made by a customer, newest first
    async fn list_by_customer(
        &self,
        customer_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>>;

    /// List bookings against a provider's services, newest first
    async fn list_by_provider(
        &self,
        provider_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>>;

    /// Insert a new booking in `pending` state
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;

    /// Persist a status change
    async fn update_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking>;
}

/// Concrete SeaORM implementation of `BookingRepository`.
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>> {
        let result = BookingEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Booking::from))
    }

    async fn list_by_customer(
        &self,
        customer_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>> {
        let mut query = BookingEntity::find()
            .filter(booking::Column::CustomerId.eq(customer_id))
            .order_by_desc(booking::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(booking::Column::Status.eq(status.as_str()));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(Booking::from).collect())
    }

    async fn list_by_provider(
        &self,
        provider_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>> {
        let mut query = BookingEntity::find()
            .filter(booking::Column::ProviderId.eq(provider_id))
            .order_by_desc(booking::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(booking::Column::Status.eq(status.as_str()));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(Booking::from).collect())
    }

    async fn create(&self, new: NewBooking) -> AppResult<Booking> {
        let now = chrono::Utc::now();
        let active = booking::ActiveModel {
            customer_id: Set(new.customer_id),
            provider_id: Set(new.provider_id),
            service_id: Set(new.service_id),
            date: Set(new.date),
            time: Set(new.time),
            address: Set(new.address),
            total_amount: Set(new.total_amount),
            status: Set(BookingStatus::Pending.as_str().to_string()),
            payment_status: Set(PAYMENT_STATUS_PENDING.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Booking::from(model))
    }

    async fn update_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        let model = BookingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: booking::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Booking::from(model))
    }
}
