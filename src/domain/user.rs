//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_PROVIDER};

/// Account roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Provider,
    Admin,
}

impl Role {
    /// Parse a role string; unknown values are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_CUSTOMER => Some(Role::Customer),
            ROLE_PROVIDER => Some(Role::Provider),
            ROLE_ADMIN => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => ROLE_CUSTOMER,
            Role::Provider => ROLE_PROVIDER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer-specific profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub phone: Option<String>,
    pub profile_pic: Option<String>,
}

/// Provider-specific profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub phone: Option<String>,
    pub profile_pic: Option<String>,
    pub business_name: Option<String>,
    pub bio: Option<String>,
    pub service_areas: Vec<String>,
    pub experience_years: i32,
    pub verified: bool,
}

/// Role-tagged profile payload.
///
/// The role determines which extra fields an account carries, so the
/// combination is modeled as a tagged variant instead of a record of
/// nullables. A customer can never hold provider-only state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Profile {
    Customer(CustomerProfile),
    Provider(ProviderProfile),
    Admin,
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Customer(_) => Role::Customer,
            Profile::Provider(_) => Role::Provider,
            Profile::Admin => Role::Admin,
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn is_provider(&self) -> bool {
        matches!(self.profile, Profile::Provider(_))
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.profile, Profile::Admin)
    }
}

/// Data for creating a user record
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile: Profile,
}

/// Profile field changes; `None` leaves a field untouched.
///
/// Provider-only fields are ignored by the store for non-provider accounts.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_pic: Option<String>,
    pub business_name: Option<String>,
    pub bio: Option<String>,
    pub service_areas: Option<Vec<String>>,
    pub experience_years: Option<i32>,
}

/// User response (safe to return to client)
///
/// The password hash is not a field here, so it can never serialize.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// Email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account role
    #[schema(example = "customer")]
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    /// Provider business name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Areas a provider serves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_areas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let role = user.role().to_string();
        let (phone, profile_pic, business_name, bio, service_areas, experience_years, verified) =
            match user.profile {
                Profile::Customer(c) => (c.phone, c.profile_pic, None, None, None, None, None),
                Profile::Provider(p) => (
                    p.phone,
                    p.profile_pic,
                    p.business_name,
                    p.bio,
                    Some(p.service_areas),
                    Some(p.experience_years),
                    Some(p.verified),
                ),
                Profile::Admin => (None, None, None, None, None, None, None),
            };

        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
            phone,
            profile_pic,
            business_name,
            bio,
            service_areas,
            experience_years,
            verified,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_user() -> User {
        User {
            id: 7,
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            password_hash: "hash".to_string(),
            profile: Profile::Provider(ProviderProfile {
                business_name: Some("Bob's Cuts".to_string()),
                ..Default::default()
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Customer, Role::Provider, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn user_serialization_omits_password_hash() {
        let user = provider_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn response_omits_password_hash_for_every_role() {
        let mut user = provider_user();
        for profile in [
            Profile::Customer(CustomerProfile::default()),
            Profile::Provider(ProviderProfile::default()),
            Profile::Admin,
        ] {
            user.profile = profile;
            let response = UserResponse::from(user.clone());
            let json = serde_json::to_value(&response).unwrap();
            assert!(json.get("password_hash").is_none());
            assert!(json.get("password").is_none());
        }
    }

    #[test]
    fn customer_response_has_no_provider_fields() {
        let mut user = provider_user();
        user.profile = Profile::Customer(CustomerProfile::default());
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("business_name").is_none());
        assert!(json.get("verified").is_none());
    }
}
