//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::config::{ROLE_ADMIN, ROLE_PROVIDER};
use crate::domain::{CustomerProfile, Profile, ProviderProfile, User};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub profile_pic: Option<String>,
    // Provider-only columns, NULL for other roles
    pub business_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    /// JSON-encoded list of areas the provider serves
    #[sea_orm(column_type = "Text", nullable)]
    pub service_areas: Option<String>,
    pub experience_years: Option<i32>,
    pub verified: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        let profile = match model.role.as_str() {
            ROLE_PROVIDER => Profile::Provider(ProviderProfile {
                phone: model.phone,
                profile_pic: model.profile_pic,
                business_name: model.business_name,
                bio: model.bio,
                service_areas: decode_service_areas(model.service_areas.as_deref()),
                experience_years: model.experience_years.unwrap_or(0),
                verified: model.verified,
            }),
            ROLE_ADMIN => Profile::Admin,
            _ => Profile::Customer(CustomerProfile {
                phone: model.phone,
                profile_pic: model.profile_pic,
            }),
        };

        User {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            profile,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Tolerant decode: a NULL or unparseable column yields an empty list.
fn decode_service_areas(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

pub fn encode_service_areas(areas: &[String]) -> Option<String> {
    if areas.is_empty() {
        None
    } else {
        serde_json::to_string(areas).ok()
    }
}
