//! Reservation Model

use super::order::{CheckoutLine, OrderItem};
use super::table::TableType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Booking mode: a regular table, or a bar/event booking that must meet
/// the bar minimum spend with pre-ordered drinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationMode {
    #[default]
    Table,
    Bar,
}

/// Reservation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Expired,
    Waitlisted,
}

impl ReservationStatus {
    /// Admin transitions. WAITLISTED is left only by promotion.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Expired) | (Confirmed, Expired) | (Waitlisted, Expired)
        )
    }

    /// Whether the reservation still occupies its table slot
    pub fn holds_slot(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

/// Reservation entity (预订)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reservation {
    pub id: i64,
    /// None while waitlisted
    pub table_id: Option<i64>,
    pub table_name: Option<String>,
    pub table_type: TableType,
    pub customer_name: String,
    pub phone: String,
    pub reservation_date: NaiveDate,
    pub time_slot: String,
    pub mode: ReservationMode,
    pub event_id: Option<i64>,
    pub minimum_spend: f64,
    pub deposit: f64,
    #[serde(default)]
    pub pre_order: Vec<OrderItem>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// POST /api/reservations payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationCreate {
    pub table_type: TableType,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(length(min = 3, max = 100))]
    pub phone: String,
    pub reservation_date: NaiveDate,
    /// Blank means "not chosen yet" and is rejected
    #[serde(default)]
    pub time_slot: String,
    #[serde(default)]
    pub mode: ReservationMode,
    pub event_id: Option<i64>,
    #[serde(default)]
    pub pre_order: Vec<CheckoutLine>,
    /// Store the request as WAITLISTED instead of failing when nothing is free
    #[serde(default)]
    pub join_waitlist: bool,
}

/// PATCH /api/reservations/{id} payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: ReservationStatus,
}

/// Status filter for the admin reservation list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationFilter {
    #[default]
    All,
    Pending,
    Confirmed,
    Expired,
    Waitlisted,
}

impl ReservationFilter {
    pub fn matches(self, status: ReservationStatus) -> bool {
        match self {
            ReservationFilter::All => true,
            ReservationFilter::Pending => status == ReservationStatus::Pending,
            ReservationFilter::Confirmed => status == ReservationStatus::Confirmed,
            ReservationFilter::Expired => status == ReservationStatus::Expired,
            ReservationFilter::Waitlisted => status == ReservationStatus::Waitlisted,
        }
    }
}

/// GET /api/reservations query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationQuery {
    #[serde(default)]
    pub status: ReservationFilter,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}
