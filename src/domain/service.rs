//! Service catalog domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog entry offered by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i32,
    pub provider_id: i32,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    /// Aggregate rating; maintained externally, not computed here
    pub rating: f64,
    pub review_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a service record
#[derive(Debug, Clone)]
pub struct NewService {
    pub provider_id: i32,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
}

/// Public catalog listing filter; every field optional.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    /// Substring match across title, category, and description
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    /// Default ordering is newest first
    pub sort: Option<ServiceSort>,
}

/// Listing sort options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceSort {
    PriceLow,
    PriceHigh,
    Rating,
}

impl ServiceSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "price-low" => Some(ServiceSort::PriceLow),
            "price-high" => Some(ServiceSort::PriceHigh),
            "rating" => Some(ServiceSort::Rating),
            _ => None,
        }
    }
}

/// Service field changes; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ServiceUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

/// Service response (public view)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub provider_id: i32,
    #[schema(example = "Haircut")]
    pub title: String,
    #[schema(example = "Grooming")]
    pub category: String,
    pub description: String,
    #[schema(example = 20.0)]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            provider_id: service.provider_id,
            title: service.title,
            category: service.category,
            description: service.description,
            price: service.price,
            image: service.image,
            rating: service.rating,
            review_count: service.review_count,
            is_active: service.is_active,
            created_at: service.created_at,
        }
    }
}
