//! Permission Definitions
//!
//! 两个角色：ADMIN 拥有 `all`；STAFF 处理订单和预订并查看报表。
//! 菜单、桌台和员工管理仅限管理员。

use shared::models::StaffRole;

pub const MENU_MANAGE: &str = "menu:manage";
pub const TABLES_MANAGE: &str = "tables:manage";
pub const STAFF_MANAGE: &str = "staff:manage";
pub const ORDERS_MANAGE: &str = "orders:manage";
pub const RESERVATIONS_MANAGE: &str = "reservations:manage";
pub const REPORTS_VIEW: &str = "reports:view";

/// Admin 默认权限
pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

/// 普通员工默认权限
pub const DEFAULT_STAFF_PERMISSIONS: &[&str] = &[ORDERS_MANAGE, RESERVATIONS_MANAGE, REPORTS_VIEW];

/// Get permissions for a role
pub fn permissions_for(role: StaffRole) -> Vec<String> {
    let perms = match role {
        StaffRole::Admin => DEFAULT_ADMIN_PERMISSIONS,
        StaffRole::Staff => DEFAULT_STAFF_PERMISSIONS,
    };
    perms.iter().map(|s| s.to_string()).collect()
}
