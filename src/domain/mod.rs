//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod booking;
pub mod password;
pub mod service;
pub mod user;

pub use booking::{Actor, Booking, BookingStatus, NewBooking};
pub use password::Password;
pub use service::{NewService, Service, ServiceFilter, ServiceResponse, ServiceSort, ServiceUpdate};
pub use user::{
    CustomerProfile, NewUser, Profile, ProfileUpdate, ProviderProfile, Role, User, UserResponse,
};
