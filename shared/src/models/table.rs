//! Table Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Table type (桌台类型)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableType {
    Standard,
    Vip,
    Lounge,
    Grill,
}

impl TableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::Standard => "STANDARD",
            TableType::Vip => "VIP",
            TableType::Lounge => "LOUNGE",
            TableType::Grill => "GRILL",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reservable slot: a date plus a time slot label ("19:00")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub time_slot: String,
}

impl SlotKey {
    pub fn new(date: NaiveDate, time_slot: impl Into<String>) -> Self {
        Self {
            date,
            time_slot: time_slot.into(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time_slot)
    }
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub id: i64,
    pub name: String,
    pub table_type: TableType,
    /// Base minimum spend before any event multiplier
    pub minimum_spend: f64,
    #[serde(default)]
    pub reserved_slots: Vec<SlotKey>,
}

impl Table {
    pub fn is_free(&self, slot: &SlotKey) -> bool {
        !self.reserved_slots.contains(slot)
    }
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TableCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub table_type: TableType,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub minimum_spend: f64,
}

/// GET /api/tables/availability query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub table_type: TableType,
    pub date: NaiveDate,
    pub time_slot: String,
}

/// Availability answer for one type/slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableAvailability {
    pub table_type: TableType,
    pub slot: SlotKey,
    pub available: bool,
    pub free_tables: usize,
    /// First free table, the one a reservation would take
    pub table: Option<Table>,
}
