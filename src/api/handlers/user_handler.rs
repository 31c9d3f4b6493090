//! User profile handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ProfileUpdate, UserResponse};
use crate::errors::AppResult;

/// Profile update request; absent fields are left untouched.
///
/// Provider-only fields are accepted but ignored for other roles.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_pic: Option<String>,
    /// Provider business name
    pub business_name: Option<String>,
    pub bio: Option<String>,
    pub service_areas: Option<Vec<String>>,
    #[validate(range(min = 0, message = "Experience must be non-negative"))]
    pub experience_years: Option<i32>,
}

/// Create user profile routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

/// Get own profile
#[utoipa::path(
    get,
    path = "/users/profile",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_profile(current_user.id()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update own profile
#[utoipa::path(
    put,
    path = "/users/profile",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_profile(
            current_user.id(),
            ProfileUpdate {
                name: payload.name,
                phone: payload.phone,
                profile_pic: payload.profile_pic,
                business_name: payload.business_name,
                bio: payload.bio,
                service_areas: payload.service_areas,
                experience_years: payload.experience_years,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}
