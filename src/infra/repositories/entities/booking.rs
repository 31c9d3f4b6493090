//! Booking database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Booking, BookingStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    /// Snapshot of the service's provider at creation time
    pub provider_id: i32,
    pub service_id: i32,
    pub date: Date,
    pub time: String,
    pub address: String,
    pub total_amount: f64,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CustomerId",
        to = "super::user::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ProviderId",
        to = "super::user::Column::Id"
    )]
    Provider,
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Booking {
    fn from(model: Model) -> Self {
        Booking {
            id: model.id,
            customer_id: model.customer_id,
            provider_id: model.provider_id,
            service_id: model.service_id,
            date: model.date,
            time: model.time,
            address: model.address,
            total_amount: model.total_amount,
            // An unknown stored value means the row predates the current
            // status set; treat it as pending rather than failing the read.
            status: BookingStatus::parse(&model.status).unwrap_or(BookingStatus::Pending),
            payment_status: model.payment_status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
