//! Authentication service - Registration, login, and token handling.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{
    CustomerProfile, NewUser, Password, Profile, ProviderProfile, Role, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token material returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 604800)]
    pub expires_in: i64,
}

/// Registration input, already validated at the transport layer.
///
/// Provider fields are ignored unless `role` is `Provider`; admin
/// registration requires the configured registration key.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
    pub business_name: Option<String>,
    pub bio: Option<String>,
    pub service_areas: Vec<String>,
    pub experience_years: i32,
    pub admin_key: Option<String>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue a token
    async fn register(&self, registration: Registration) -> AppResult<(User, TokenResponse)>;

    /// Login and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<(User, TokenResponse)>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role().to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Normalize an email for lookup and storage.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Concrete implementation of `AuthService`.
pub struct Authenticator<R: Repositories> {
    repos: Arc<R>,
    config: Config,
}

impl<R: Repositories> Authenticator<R> {
    /// Create new auth service instance
    pub fn new(repos: Arc<R>, config: Config) -> Self {
        Self { repos, config }
    }
}

#[async_trait]
impl<R: Repositories> AuthService for Authenticator<R> {
    async fn register(&self, registration: Registration) -> AppResult<(User, TokenResponse)> {
        let email = normalize_email(&registration.email);

        // Advisory pre-check; the unique index on users.email closes the
        // race between concurrent registrations.
        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let profile = match registration.role {
            Role::Customer => Profile::Customer(CustomerProfile {
                phone: registration.phone,
                profile_pic: None,
            }),
            Role::Provider => Profile::Provider(ProviderProfile {
                phone: registration.phone,
                profile_pic: None,
                business_name: registration.business_name,
                bio: registration.bio,
                service_areas: registration.service_areas,
                experience_years: registration.experience_years,
                verified: false,
            }),
            Role::Admin => {
                let supplied = registration.admin_key.as_deref().unwrap_or_default();
                if !self.config.admin_key_matches(supplied) {
                    return Err(AppError::Forbidden);
                }
                Profile::Admin
            }
        };

        let password_hash = Password::new(&registration.password)?.into_string();

        let user = self
            .repos
            .users()
            .create(NewUser {
                name: registration.name.trim().to_string(),
                email,
                password_hash,
                profile,
            })
            .await?;

        let tokens = generate_token(&user, &self.config)?;
        Ok((user, tokens))
    }

    async fn login(&self, email: String, password: String) -> AppResult<(User, TokenResponse)> {
        let email = normalize_email(&email);
        let user_result = self.repos.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Only succeed if both user exists AND password is valid; the
        // error is identical for unknown email and wrong password.
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = user_result.expect("user existence checked above");
        let tokens = generate_token(&user, &self.config)?;
        Ok((user, tokens))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
