//! Booking service - Reservation creation, visibility, and transitions.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::{Booking, BookingStatus, NewBooking, Service};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Repositories;

/// Booking creation input, already validated at the transport layer.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: String,
    pub address: String,
    pub total_amount: f64,
}

/// Booking service trait for dependency injection.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Create a booking against an active service.
    ///
    /// Snapshots the service's current provider onto the booking; the
    /// snapshot is never re-derived afterwards.
    async fn create_booking(&self, customer_id: i32, request: BookingRequest)
        -> AppResult<Booking>;

    /// Fetch a booking and its service; participants only.
    ///
    /// The service is loaded with a separate lookup after the ownership
    /// check, so each store access stays explicit.
    async fn get_booking(&self, requester_id: i32, id: i32)
        -> AppResult<(Booking, Option<Service>)>;

    /// List bookings the requester made as a customer
    async fn list_for_customer(
        &self,
        customer_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>>;

    /// List bookings against the requester's services
    async fn list_for_provider(
        &self,
        provider_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>>;

    /// Request a status transition on behalf of `requester_id`
    async fn transition(
        &self,
        requester_id: i32,
        id: i32,
        to: BookingStatus,
    ) -> AppResult<Booking>;
}

/// Concrete implementation of `BookingService`.
pub struct BookingManager<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> BookingManager<R> {
    /// Create new booking service instance
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl<R: Repositories> BookingService for BookingManager<R> {
    async fn create_booking(
        &self,
        customer_id: i32,
        request: BookingRequest,
    ) -> AppResult<Booking> {
        if request.total_amount < 0.0 {
            return Err(AppError::validation("Total amount must be non-negative"));
        }

        // A missing and a deactivated service are indistinguishable here
        let service = self
            .repos
            .services()
            .find_by_id(request.service_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or(AppError::NotFound)?;

        self.repos
            .bookings()
            .create(NewBooking {
                customer_id,
                provider_id: service.provider_id,
                service_id: service.id,
                date: request.date,
                time: request.time,
                address: request.address,
                total_amount: request.total_amount,
            })
            .await
    }

    async fn get_booking(
        &self,
        requester_id: i32,
        id: i32,
    ) -> AppResult<(Booking, Option<Service>)> {
        let booking = self.repos.bookings().find_by_id(id).await?.ok_or_not_found()?;

        if !booking.visible_to(requester_id) {
            return Err(AppError::Forbidden);
        }

        let service = self.repos.services().find_by_id(booking.service_id).await?;

        Ok((booking, service))
    }

    async fn list_for_customer(
        &self,
        customer_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>> {
        self.repos
            .bookings()
            .list_by_customer(customer_id, status)
            .await
    }

    async fn list_for_provider(
        &self,
        provider_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>> {
        self.repos
            .bookings()
            .list_by_provider(provider_id, status)
            .await
    }

    async fn transition(
        &self,
        requester_id: i32,
        id: i32,
        to: BookingStatus,
    ) -> AppResult<Booking> {
        let booking = self.repos.bookings().find_by_id(id).await?.ok_or_not_found()?;

        let actor = booking.actor_for(requester_id).ok_or(AppError::Forbidden)?;
        booking.status.authorize_transition(to, actor)?;

        self.repos.bookings().update_status(id, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::infra::{
        BookingRepository, MockBookingRepository, MockServiceRepository, MockUserRepository,
        ServiceRepository, UserRepository,
    };

    /// Repositories backed by mocks for service-level tests
    struct TestRepos {
        users: Arc<MockUserRepository>,
        services: Arc<MockServiceRepository>,
        bookings: Arc<MockBookingRepository>,
    }

    impl TestRepos {
        fn new(
            services: MockServiceRepository,
            bookings: MockBookingRepository,
        ) -> Self {
            Self {
                users: Arc::new(MockUserRepository::new()),
                services: Arc::new(services),
                bookings: Arc::new(bookings),
            }
        }
    }

    impl Repositories for TestRepos {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn services(&self) -> Arc<dyn ServiceRepository> {
            self.services.clone()
        }

        fn bookings(&self) -> Arc<dyn BookingRepository> {
            self.bookings.clone()
        }
    }

    fn haircut(provider_id: i32, is_active: bool) -> Service {
        Service {
            id: 11,
            provider_id,
            title: "Haircut".to_string(),
            category: "Grooming".to_string(),
            description: String::new(),
            price: 20.0,
            image: None,
            rating: 0.0,
            review_count: 0,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booking_with(customer_id: i32, provider_id: i32, status: BookingStatus) -> Booking {
        Booking {
            id: 5,
            customer_id,
            provider_id,
            service_id: 11,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: "10:00".to_string(),
            address: "1 Main St".to_string(),
            total_amount: 20.0,
            status,
            payment_status: "pending".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request() -> BookingRequest {
        BookingRequest {
            service_id: 11,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: "10:00".to_string(),
            address: "1 Main St".to_string(),
            total_amount: 20.0,
        }
    }

    #[tokio::test]
    async fn create_booking_snapshots_provider_id() {
        let mut services = MockServiceRepository::new();
        services
            .expect_find_by_id()
            .with(eq(11))
            .returning(|_| Ok(Some(haircut(42, true))));

        let mut bookings = MockBookingRepository::new();
        bookings.expect_create().returning(|new| {
            assert_eq!(new.provider_id, 42);
            let mut booking = booking_with(new.customer_id, new.provider_id, BookingStatus::Pending);
            booking.service_id = new.service_id;
            Ok(booking)
        });

        let manager = BookingManager::new(Arc::new(TestRepos::new(services, bookings)));
        let booking = manager.create_booking(1, request()).await.unwrap();

        assert_eq!(booking.provider_id, 42);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn create_booking_rejects_inactive_service() {
        let mut services = MockServiceRepository::new();
        services
            .expect_find_by_id()
            .returning(|_| Ok(Some(haircut(42, false))));

        let bookings = MockBookingRepository::new();
        let manager = BookingManager::new(Arc::new(TestRepos::new(services, bookings)));

        let err = manager.create_booking(1, request()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn create_booking_rejects_missing_service() {
        let mut services = MockServiceRepository::new();
        services.expect_find_by_id().returning(|_| Ok(None));

        let bookings = MockBookingRepository::new();
        let manager = BookingManager::new(Arc::new(TestRepos::new(services, bookings)));

        let err = manager.create_booking(1, request()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn customer_cannot_confirm() {
        let services = MockServiceRepository::new();
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .returning(|_| Ok(Some(booking_with(1, 42, BookingStatus::Pending))));

        let manager = BookingManager::new(Arc::new(TestRepos::new(services, bookings)));

        let err = manager
            .transition(1, 5, BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn provider_confirms_pending_booking() {
        let services = MockServiceRepository::new();
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .returning(|_| Ok(Some(booking_with(1, 42, BookingStatus::Pending))));
        bookings
            .expect_update_status()
            .with(eq(5), eq(BookingStatus::Confirmed))
            .returning(|_, status| Ok(booking_with(1, 42, status)));

        let manager = BookingManager::new(Arc::new(TestRepos::new(services, bookings)));

        let booking = manager
            .transition(42, 5, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn completed_booking_rejects_further_transitions() {
        let services = MockServiceRepository::new();
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .returning(|_| Ok(Some(booking_with(1, 42, BookingStatus::Completed))));

        let manager = BookingManager::new(Arc::new(TestRepos::new(services, bookings)));

        let err = manager
            .transition(42, 5, BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition));
    }

    #[tokio::test]
    async fn bystander_cannot_read_booking() {
        let services = MockServiceRepository::new();
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .returning(|_| Ok(Some(booking_with(1, 42, BookingStatus::Pending))));

        let manager = BookingManager::new(Arc::new(TestRepos::new(services, bookings)));

        let err = manager.get_booking(99, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
