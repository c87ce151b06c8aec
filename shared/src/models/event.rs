//! Event Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lounge event / themed night
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    pub image_url: Option<String>,
    /// Themed nights scale table minimum spend by the event multiplier
    pub themed: bool,
    pub capacity: u32,
    pub tickets_sold: u32,
    pub revenue: f64,
}

/// Create event payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub date: NaiveDate,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub themed: bool,
    #[validate(range(min = 1))]
    pub capacity: u32,
    #[serde(default)]
    pub tickets_sold: u32,
    #[serde(default)]
    pub revenue: f64,
}
