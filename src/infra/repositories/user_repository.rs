//! User repository - SeaORM-backed credential store access.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::user::{self, encode_service_areas, Entity as UserEntity};
use crate::config::ROLE_PROVIDER;
use crate::domain::{NewUser, Profile, ProfileUpdate, User};
use crate::errors::{AppError, AppResult};

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user; a duplicate email surfaces as `Conflict`
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply profile changes to an existing user
    async fn update_profile(&self, id: i32, changes: ProfileUpdate) -> AppResult<User>;
}

/// Concrete SeaORM implementation of `UserRepository`.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let role = new.profile.role();

        let mut active = user::ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            role: Set(role.as_str().to_string()),
            verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match new.profile {
            Profile::Customer(c) => {
                active.phone = Set(c.phone);
                active.profile_pic = Set(c.profile_pic);
            }
            Profile::Provider(p) => {
                active.phone = Set(p.phone);
                active.profile_pic = Set(p.profile_pic);
                active.business_name = Set(p.business_name);
                active.bio = Set(p.bio);
                active.service_areas = Set(encode_service_areas(&p.service_areas));
                active.experience_years = Set(Some(p.experience_years));
                active.verified = Set(p.verified);
            }
            Profile::Admin => {}
        }

        // The unique index on email is the authoritative duplicate guard;
        // map its violation to the same error as the application pre-check.
        let model = active.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::conflict("User")
            } else {
                AppError::from(e)
            }
        })?;

        Ok(User::from(model))
    }

    async fn update_profile(&self, id: i32, changes: ProfileUpdate) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let is_provider = model.role == ROLE_PROVIDER;
        let mut active: user::ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(profile_pic) = changes.profile_pic {
            active.profile_pic = Set(Some(profile_pic));
        }

        // Provider-only columns stay untouched for other roles
        if is_provider {
            if let Some(business_name) = changes.business_name {
                active.business_name = Set(Some(business_name));
            }
            if let Some(bio) = changes.bio {
                active.bio = Set(Some(bio));
            }
            if let Some(areas) = changes.service_areas {
                active.service_areas = Set(encode_service_areas(&areas));
            }
            if let Some(years) = changes.experience_years {
                active.experience_years = Set(Some(years));
            }
        }

        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(User::from(model))
    }
}
