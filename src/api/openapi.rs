//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, booking_handler, service_handler, user_handler};
use crate::domain::{BookingStatus, Role, ServiceResponse, UserResponse};
use crate::services::TokenResponse;

/// OpenAPI documentation for ServiceHub
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ServiceHub",
        version = "0.1.0",
        description = "Multi-role booking marketplace API with Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        // Profile endpoints
        user_handler::get_profile,
        user_handler::update_profile,
        // Public catalog endpoints
        service_handler::list_services,
        service_handler::list_categories,
        service_handler::get_service,
        // Provider endpoints
        service_handler::list_own_services,
        service_handler::create_service,
        service_handler::update_service,
        service_handler::deactivate_service,
        booking_handler::list_provider_bookings,
        // Booking endpoints
        booking_handler::create_booking,
        booking_handler::list_bookings,
        booking_handler::get_booking,
        booking_handler::update_booking_status,
    ),
    components(
        schemas(
            // Domain types
            Role,
            BookingStatus,
            UserResponse,
            ServiceResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::AuthResponse,
            TokenResponse,
            // Profile types
            user_handler::UpdateProfileRequest,
            // Catalog types
            service_handler::CreateServiceRequest,
            service_handler::UpdateServiceRequest,
            // Booking types
            booking_handler::CreateBookingRequest,
            booking_handler::UpdateBookingStatusRequest,
            booking_handler::BookingResponse,
            booking_handler::BookingDetailResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "Profile operations"),
        (name = "Services", description = "Public service catalog"),
        (name = "Provider", description = "Provider-side service and booking management"),
        (name = "Bookings", description = "Booking lifecycle operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
