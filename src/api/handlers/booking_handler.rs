//! Booking handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_provider, CurrentUser};
use crate::api::AppState;
use crate::domain::{Booking, BookingStatus, Service, ServiceResponse};
use crate::errors::{AppError, AppResult};
use crate::services::BookingRequest;

/// Booking creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[schema(example = 1)]
    pub service_id: i32,
    /// Requested date (YYYY-MM-DD)
    #[schema(example = "2025-06-01")]
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Time is required"))]
    #[schema(example = "10:00")]
    pub time: String,
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "1 Main St")]
    pub address: String,
    #[validate(range(min = 0.0, message = "Total amount must be non-negative"))]
    #[schema(example = 20.0)]
    pub total_amount: f64,
}

/// Booking status change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingStatusRequest {
    #[schema(example = "confirmed")]
    pub status: BookingStatus,
}

/// Optional status filter for booking listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingListQuery {
    /// One of `pending`, `confirmed`, `in-progress`, `completed`, `cancelled`
    pub status: Option<String>,
}

impl BookingListQuery {
    fn parse_status(&self) -> AppResult<Option<BookingStatus>> {
        match self.status.as_deref() {
            None => Ok(None),
            Some(raw) => BookingStatus::parse(raw)
                .map(Some)
                .ok_or_else(|| AppError::validation("Invalid status filter")),
        }
    }
}

/// Booking view
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub customer_id: i32,
    pub provider_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: String,
    pub address: String,
    pub total_amount: f64,
    #[schema(example = "pending")]
    pub status: BookingStatus,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            customer_id: booking.customer_id,
            provider_id: booking.provider_id,
            service_id: booking.service_id,
            date: booking.date,
            time: booking.time,
            address: booking.address,
            total_amount: booking.total_amount,
            status: booking.status,
            payment_status: booking.payment_status,
            created_at: booking.created_at,
        }
    }
}

/// Booking together with its service
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDetailResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceResponse>,
}

impl BookingDetailResponse {
    fn new(booking: Booking, service: Option<Service>) -> Self {
        Self {
            booking: BookingResponse::from(booking),
            service: service.map(ServiceResponse::from),
        }
    }
}

/// Create customer-side booking routes
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", get(get_booking))
        .route("/:id/status", axum::routing::put(update_booking_status))
}

/// Create provider-side booking routes
pub fn provider_booking_routes() -> Router<AppState> {
    Router::new().route("/", get(list_provider_bookings))
}

/// Create a booking against an active service
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created in pending state", body = BookingResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Service not found or inactive")
    )
)]
pub async fn create_booking(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = state
        .booking_service
        .create_booking(
            current_user.id(),
            BookingRequest {
                service_id: payload.service_id,
                date: payload.date,
                time: payload.time,
                address: payload.address,
                total_amount: payload.total_amount,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// List own bookings as a customer
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(BookingListQuery),
    responses(
        (status = 200, description = "Own bookings", body = Vec<BookingResponse>),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_bookings(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let status = query.parse_status()?;
    let bookings = state
        .booking_service
        .list_for_customer(current_user.id(), status)
        .await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// Get a booking with its service; participants only
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking detail", body = BookingDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a participant of this booking"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetailResponse>> {
    let (booking, service) = state
        .booking_service
        .get_booking(current_user.id(), id)
        .await?;

    Ok(Json(BookingDetailResponse::new(booking, service)))
}

/// Request a booking status transition
#[utoipa::path(
    put,
    path = "/bookings/{id}/status",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Booking transitioned", body = BookingResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Transition not allowed for this actor"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already finalized")
    )
)]
pub async fn update_booking_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateBookingStatusRequest>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .booking_service
        .transition(current_user.id(), id, payload.status)
        .await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// List bookings against own services
#[utoipa::path(
    get,
    path = "/provider/bookings",
    tag = "Provider",
    security(("bearer_auth" = [])),
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings against the provider's services", body = Vec<BookingResponse>),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Provider account required")
    )
)]
pub async fn list_provider_bookings(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    require_provider(&current_user)?;

    let status = query.parse_status()?;
    let bookings = state
        .booking_service
        .list_for_provider(current_user.id(), status)
        .await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}
