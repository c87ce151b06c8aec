//! Menu Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which side of the house prepares the item
///
/// BAR items count as drinks towards the bar minimum spend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuSection {
    #[default]
    Kitchen,
    Bar,
}

impl MenuSection {
    pub fn label(&self) -> &'static str {
        match self {
            MenuSection::Kitchen => "Kitchen",
            MenuSection::Bar => "Bar",
        }
    }
}

/// Menu catalog entry (菜品)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub section: MenuSection,
    pub is_available: bool,
    pub popular: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub price: f64,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    pub section: MenuSection,
    pub is_available: Option<bool>,
    pub popular: Option<bool>,
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub section: Option<MenuSection>,
    pub is_available: Option<bool>,
    pub popular: Option<bool>,
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
}

/// PATCH /api/menu-items/{id}/availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}

/// PATCH /api/menu-items/{id}/popular
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularUpdate {
    pub popular: bool,
}

/// Menu list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}
