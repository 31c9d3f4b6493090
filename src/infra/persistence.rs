//! Repository access point.
//!
//! Centralizes construction of the concrete stores over one database
//! connection and hands them out behind trait objects, so services
//! depend on abstractions and tests can substitute fakes.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    BookingRepository, BookingStore, ServiceRepository, ServiceStore, UserRepository, UserStore,
};

/// Repository accessor trait for dependency injection.
pub trait Repositories: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get service repository
    fn services(&self) -> Arc<dyn ServiceRepository>;

    /// Get booking repository
    fn bookings(&self) -> Arc<dyn BookingRepository>;
}

/// Concrete implementation of `Repositories` over SeaORM stores.
pub struct Persistence {
    user_repo: Arc<UserStore>,
    service_repo: Arc<ServiceStore>,
    booking_repo: Arc<BookingStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            service_repo: Arc::new(ServiceStore::new(db.clone())),
            booking_repo: Arc::new(BookingStore::new(db)),
        }
    }
}

impl Repositories for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn services(&self) -> Arc<dyn ServiceRepository> {
        self.service_repo.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.booking_repo.clone()
    }
}
