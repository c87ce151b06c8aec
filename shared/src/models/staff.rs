//! Staff Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Staff role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Admin,
    Staff,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "ADMIN",
            StaffRole::Staff => "STAFF",
        }
    }
}

/// Staff member (员工)
///
/// The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub is_online: bool,
    pub last_active: Option<DateTime<Utc>>,
    pub current_action: Option<String>,
    #[serde(skip)]
    pub password_hash: String,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StaffCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role: StaffRole,
}

/// PATCH /api/staff/{id}/role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRoleUpdate {
    pub role: StaffRole,
}

/// Pagination query shared by list endpoints without filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}
