//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Role-conditional user fields are flat nullable columns here; the
//! conversion into the domain layer builds the tagged profile variant.

pub mod booking;
pub mod service;
pub mod user;
