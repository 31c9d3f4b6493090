//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository abstractions for
//! dependency inversion.

mod auth_service;
mod booking_service;
mod catalog_service;
pub mod container;
mod user_service;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, Registration, TokenResponse};
pub use booking_service::{BookingManager, BookingRequest, BookingService};
pub use catalog_service::{Catalog, CatalogService};
pub use user_service::{UserManager, UserService};
