//! Booking domain entity and status state machine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{
    STATUS_CANCELLED, STATUS_COMPLETED, STATUS_CONFIRMED, STATUS_IN_PROGRESS, STATUS_PENDING,
};
use crate::errors::{AppError, AppResult};

/// Booking lifecycle states.
///
/// `pending -> confirmed -> in-progress -> completed`, with `cancelled`
/// reachable from `pending` or `confirmed`. `completed` and `cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => STATUS_PENDING,
            BookingStatus::Confirmed => STATUS_CONFIRMED,
            BookingStatus::InProgress => STATUS_IN_PROGRESS,
            BookingStatus::Completed => STATUS_COMPLETED,
            BookingStatus::Cancelled => STATUS_CANCELLED,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            STATUS_PENDING => Some(BookingStatus::Pending),
            STATUS_CONFIRMED => Some(BookingStatus::Confirmed),
            STATUS_IN_PROGRESS => Some(BookingStatus::InProgress),
            STATUS_COMPLETED => Some(BookingStatus::Completed),
            STATUS_CANCELLED => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Check whether `actor` may move a booking from `self` to `to`.
    ///
    /// Only the booking's provider advances the forward chain; either
    /// party may cancel while the booking is pending or confirmed.
    /// Leaving a terminal state is `InvalidTransition`; every other
    /// disallowed request is `Forbidden`.
    pub fn authorize_transition(self, to: BookingStatus, actor: Actor) -> AppResult<()> {
        use BookingStatus::*;

        if self.is_terminal() {
            return Err(AppError::InvalidTransition);
        }

        let allowed = match (self, to) {
            (Pending, Confirmed) | (Confirmed, InProgress) | (InProgress, Completed) => {
                actor == Actor::Provider
            }
            (Pending, Cancelled) | (Confirmed, Cancelled) => true,
            _ => false,
        };

        if allowed {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of a booking a user is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Customer,
    Provider,
}

/// A reservation linking a customer, a provider, and a service.
///
/// `provider_id` is a snapshot of the service's provider taken at
/// creation time; it is never re-derived from the service afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub provider_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: String,
    pub address: String,
    pub total_amount: f64,
    pub status: BookingStatus,
    /// Free-text payment state; nothing enforces transitions on it
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Resolve which side of this booking `user_id` is on, if any.
    pub fn actor_for(&self, user_id: i32) -> Option<Actor> {
        if user_id == self.customer_id {
            Some(Actor::Customer)
        } else if user_id == self.provider_id {
            Some(Actor::Provider)
        } else {
            None
        }
    }

    /// A booking is visible only to its customer or its provider.
    pub fn visible_to(&self, user_id: i32) -> bool {
        self.actor_for(user_id).is_some()
    }
}

/// Data for creating a booking record
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i32,
    pub provider_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: String,
    pub address: String,
    pub total_amount: f64,
}
