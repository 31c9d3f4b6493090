//! Service catalog handlers - public browsing and provider management.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_provider, CurrentUser};
use crate::api::AppState;
use crate::domain::{NewService, ServiceFilter, ServiceResponse, ServiceSort, ServiceUpdate};
use crate::errors::AppResult;

/// Public catalog listing filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListServicesQuery {
    /// Substring match across title, category, and description
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    /// One of `price-low`, `price-high`, `rating`; default newest first
    pub sort_by: Option<String>,
}

impl From<ListServicesQuery> for ServiceFilter {
    fn from(query: ListServicesQuery) -> Self {
        ServiceFilter {
            search: query.search,
            category: query.category,
            min_price: query.min_price,
            max_price: query.max_price,
            min_rating: query.min_rating,
            // Unknown sort keys fall back to the default ordering
            sort: query.sort_by.as_deref().and_then(ServiceSort::parse),
        }
    }
}

/// Service creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Haircut")]
    pub title: String,
    #[validate(length(min = 1, message = "Category is required"))]
    #[schema(example = "Grooming")]
    pub category: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    #[schema(example = 20.0)]
    pub price: f64,
    pub image: Option<String>,
}

/// Service update request; absent fields are left untouched.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    pub price: Option<f64>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

/// Create public catalog routes
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services))
        .route("/categories", get(list_categories))
        .route("/:id", get(get_service))
}

/// Create provider-side service management routes
pub fn provider_service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_own_services).post(create_service))
        .route("/:id", axum::routing::put(update_service).delete(deactivate_service))
}

/// List active services
#[utoipa::path(
    get,
    path = "/services",
    tag = "Services",
    params(ListServicesQuery),
    responses(
        (status = 200, description = "Active services matching the filter", body = Vec<ServiceResponse>)
    )
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ListServicesQuery>,
) -> AppResult<Json<Vec<ServiceResponse>>> {
    let services = state.catalog_service.list_services(query.into()).await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

/// List distinct categories
#[utoipa::path(
    get,
    path = "/services/categories",
    tag = "Services",
    responses(
        (status = 200, description = "Distinct categories of active services", body = Vec<String>)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(Json(categories))
}

/// Get a service by ID
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service", body = ServiceResponse),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ServiceResponse>> {
    let service = state.catalog_service.get_service(id).await?;
    Ok(Json(ServiceResponse::from(service)))
}

/// List own services, including inactive ones
#[utoipa::path(
    get,
    path = "/provider/services",
    tag = "Provider",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Provider's services", body = Vec<ServiceResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Provider account required")
    )
)]
pub async fn list_own_services(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ServiceResponse>>> {
    require_provider(&current_user)?;

    let services = state
        .catalog_service
        .list_provider_services(current_user.id())
        .await?;

    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

/// Create a service
#[utoipa::path(
    post,
    path = "/provider/services",
    tag = "Provider",
    security(("bearer_auth" = [])),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Provider account required")
    )
)]
pub async fn create_service(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ServiceResponse>)> {
    require_provider(&current_user)?;

    let service = state
        .catalog_service
        .create_service(NewService {
            provider_id: current_user.id(),
            title: payload.title,
            category: payload.category,
            description: payload.description.unwrap_or_default(),
            price: payload.price,
            image: payload.image,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

/// Update an owned service
#[utoipa::path(
    put,
    path = "/provider/services/{id}",
    tag = "Provider",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Provider account required"),
        (status = 404, description = "Service not found or not owned")
    )
)]
pub async fn update_service(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateServiceRequest>,
) -> AppResult<Json<ServiceResponse>> {
    require_provider(&current_user)?;

    let service = state
        .catalog_service
        .update_service(
            id,
            current_user.id(),
            ServiceUpdate {
                title: payload.title,
                category: payload.category,
                description: payload.description,
                price: payload.price,
                image: payload.image,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(ServiceResponse::from(service)))
}

/// Deactivate an owned service
#[utoipa::path(
    delete,
    path = "/provider/services/{id}",
    tag = "Provider",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service deactivated", body = ServiceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Provider account required"),
        (status = 404, description = "Service not found or not owned")
    )
)]
pub async fn deactivate_service(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ServiceResponse>> {
    require_provider(&current_user)?;

    let service = state
        .catalog_service
        .deactivate_service(id, current_user.id())
        .await?;

    Ok(Json(ServiceResponse::from(service)))
}
