//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::AppError;

/// The user record resolved from the request's bearer token.
///
/// Lives in request extensions for the duration of one request;
/// nothing is retained between requests.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    pub fn is_provider(&self) -> bool {
        self.0.is_provider()
    }
}

/// JWT authentication middleware.
///
/// Extracts and verifies the bearer token, then loads the subject's
/// user record from the store. A valid token whose subject no longer
/// exists is still rejected as unauthenticated, not as missing, so
/// callers cannot probe for account existence.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let user = state
        .user_service
        .get_profile(claims.sub)
        .await
        .map_err(|_| AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Require provider role, returns Forbidden error otherwise.
pub fn require_provider(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_provider() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
