//! Admin dashboard, KPI and analytics DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// GET /api/admin-dashboard
///
/// camelCase on the wire, matching what the admin overview reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardStats {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub total_menu_items: usize,
    pub total_reservations: usize,
    pub active_tables: usize,
    pub total_tables: usize,
}

/// Order KPI cards
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub paid: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Sum over PAID and COMPLETED orders
    pub revenue: f64,
}

/// Reservation KPI cards
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReservationStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub expired: usize,
    pub waitlisted: usize,
}

/// Item count per menu category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Menu KPI cards
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MenuStats {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
    pub popular: usize,
    pub categories: Vec<CategoryCount>,
}

/// Insight tag attached to an event in the analytics view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventInsight {
    TopRevenue,
    MostTickets,
    HighAttendance,
    LowConversion,
}

impl EventInsight {
    pub fn label(&self) -> &'static str {
        match self {
            EventInsight::TopRevenue => "Top Revenue",
            EventInsight::MostTickets => "Most Tickets",
            EventInsight::HighAttendance => "High Attendance",
            EventInsight::LowConversion => "Low Conversion",
        }
    }
}

/// Per-event performance row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventPerformance {
    pub event_id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub capacity: u32,
    pub tickets_sold: u32,
    pub revenue: f64,
    /// tickets_sold / capacity in percent, rounded to a whole percent
    pub attendance_pct: f64,
    /// Percent difference to the highest-revenue event (0 for the peak)
    pub revenue_vs_peak_pct: f64,
    pub insights: Vec<EventInsight>,
}

/// GET /api/admin/events/analytics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventAnalytics {
    pub total_events: usize,
    pub total_tickets: u64,
    pub total_revenue: f64,
    pub average_attendance_pct: f64,
    pub events: Vec<EventPerformance>,
}

/// Revenue bucket for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders: usize,
}

/// Order count per preparation section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionCount {
    pub section: String,
    pub orders: usize,
}

/// GET /api/admin/analytics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Analytics {
    pub revenue_by_day: Vec<DailyRevenue>,
    pub orders_by_section: Vec<SectionCount>,
    pub average_order_value: f64,
}

/// Paginated list response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// 数据列表
    pub items: Vec<T>,
    /// 总记录数
    pub total: usize,
    /// 当前页码 (1-based)
    pub page: u32,
    /// 每页数量
    pub page_size: u32,
    /// 总页数
    pub total_pages: u32,
}
