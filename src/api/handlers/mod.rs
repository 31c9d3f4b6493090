//! HTTP request handlers.

pub mod auth_handler;
pub mod booking_handler;
pub mod service_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use booking_handler::{booking_routes, provider_booking_routes};
pub use service_handler::{provider_service_routes, service_routes};
pub use user_handler::user_routes;
