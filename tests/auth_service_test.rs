//! Authentication service integration tests over in-memory fakes.

mod common;

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use servicehub::config::Config;
use servicehub::domain::Role;
use servicehub::errors::AppError;
use servicehub::infra::UserRepository;
use servicehub::services::{AuthService, Authenticator, Claims, Registration};

use common::FakeRepos;

const TEST_JWT_SECRET: &str = "integration-test-secret-key-32chars!";
const TEST_ADMIN_KEY: &str = "test-admin-registration-key";

fn test_config() -> Config {
    std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);
    std::env::set_var("ADMIN_REGISTRATION_KEY", TEST_ADMIN_KEY);
    std::env::set_var("JWT_EXPIRATION_HOURS", "1");
    Config::from_env()
}

fn authenticator() -> (Authenticator<FakeRepos>, Arc<FakeRepos>) {
    let repos = Arc::new(FakeRepos::default());
    (Authenticator::new(repos.clone(), test_config()), repos)
}

fn customer_registration(email: &str, password: &str) -> Registration {
    Registration {
        name: "Alice".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: Role::Customer,
        phone: None,
        business_name: None,
        bio: None,
        service_areas: vec![],
        experience_years: 0,
        admin_key: None,
    }
}

#[tokio::test]
async fn register_then_login_succeeds() {
    let (auth, _) = authenticator();

    let (user, tokens) = auth
        .register(customer_registration("alice@example.com", "password123"))
        .await
        .unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert!(!tokens.access_token.is_empty());

    let (logged_in, _) = auth
        .login("alice@example.com".to_string(), "password123".to_string())
        .await
        .unwrap();
    assert_eq!(logged_in.id, user.id);
}

#[tokio::test]
async fn registration_normalizes_email_case() {
    let (auth, _) = authenticator();

    auth.register(customer_registration("  Alice@Example.COM ", "password123"))
        .await
        .unwrap();

    // Login with the canonical form succeeds
    let result = auth
        .login("alice@example.com".to_string(), "password123".to_string())
        .await;
    assert!(result.is_ok());

    // A differently-cased duplicate is still a duplicate
    let err = auth
        .register(customer_registration("ALICE@example.com", "password123"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn duplicate_email_leaves_store_unchanged() {
    let (auth, repos) = authenticator();

    auth.register(customer_registration("alice@example.com", "password123"))
        .await
        .unwrap();
    assert_eq!(repos.user_repo.len(), 1);

    let err = auth
        .register(customer_registration("alice@example.com", "different456"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(repos.user_repo.len(), 1);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let (auth, _) = authenticator();

    auth.register(customer_registration("alice@example.com", "password123"))
        .await
        .unwrap();

    let wrong_password = auth
        .login("alice@example.com".to_string(), "nottherightone".to_string())
        .await
        .unwrap_err();
    let unknown_email = auth
        .login("nobody@example.com".to_string(), "password123".to_string())
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_email, AppError::InvalidCredentials));
    // Same outward message in both cases
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn stored_hash_is_not_the_plaintext() {
    let (auth, repos) = authenticator();

    auth.register(customer_registration("alice@example.com", "password123"))
        .await
        .unwrap();

    let stored = repos
        .user_repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "password123");
    assert!(!stored.password_hash.contains("password123"));
}

#[tokio::test]
async fn issued_token_verifies_and_carries_the_subject() {
    let (auth, _) = authenticator();

    let (user, tokens) = auth
        .register(customer_registration("alice@example.com", "password123"))
        .await
        .unwrap();

    let claims = auth.verify_token(&tokens.access_token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "alice@example.com");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let (auth, _) = authenticator();

    // Expired well past the default decoding leeway
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: 1,
        email: "alice@example.com".to_string(),
        role: "customer".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let stale = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    assert!(auth.verify_token(&stale).is_err());
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let (auth, _) = authenticator();

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: 1,
        email: "alice@example.com".to_string(),
        role: "customer".to_string(),
        iat: now,
        exp: now + 3600,
    };
    let foreign = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret-entirely-32chars!"),
    )
    .unwrap();

    assert!(auth.verify_token(&foreign).is_err());
    assert!(auth.verify_token("not-even-a-jwt").is_err());
}

#[tokio::test]
async fn admin_registration_requires_the_configured_key() {
    let (auth, _) = authenticator();

    let mut registration = customer_registration("root@example.com", "password123");
    registration.role = Role::Admin;

    registration.admin_key = Some("wrong-key".to_string());
    let err = auth.register(registration.clone()).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    registration.admin_key = Some(TEST_ADMIN_KEY.to_string());
    let (user, _) = auth.register(registration).await.unwrap();
    assert_eq!(user.role(), Role::Admin);
}

/// Walk a JSON tree asserting no password-like key exists at any depth.
fn assert_no_password_keys(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                let key = key.to_lowercase();
                assert!(
                    !key.contains("password") && !key.contains("hash"),
                    "leaked credential field: {}",
                    key
                );
                assert_no_password_keys(nested);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                assert_no_password_keys(item);
            }
        }
        _ => {}
    }
}

#[tokio::test]
async fn redacted_views_never_contain_credential_fields() {
    let (auth, _) = authenticator();

    for (email, role) in [
        ("customer@example.com", Role::Customer),
        ("provider@example.com", Role::Provider),
    ] {
        let mut registration = customer_registration(email, "password123");
        registration.role = role;
        let (user, _) = auth.register(registration).await.unwrap();

        let view = servicehub::domain::UserResponse::from(user);
        let json = serde_json::to_value(&view).unwrap();
        assert_no_password_keys(&json);

        // Round trip through a string and back
        let reparsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&view).unwrap()).unwrap();
        assert_no_password_keys(&reparsed);
    }
}
