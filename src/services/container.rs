//! Service Container - Centralized service construction.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, BookingManager, BookingService, Catalog, CatalogService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Holds every application service behind its trait object.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    catalog_service: Arc<dyn CatalogService>,
    booking_service: Arc<dyn BookingService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let repos = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(repos.clone(), config)),
            user_service: Arc::new(UserManager::new(repos.clone())),
            catalog_service: Arc::new(Catalog::new(repos.clone())),
            booking_service: Arc::new(BookingManager::new(repos)),
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get catalog service
    pub fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    /// Get booking service
    pub fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }
}
