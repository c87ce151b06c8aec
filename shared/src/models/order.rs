//! Order Model

use super::menu_item::{MenuItem, MenuSection};
use crate::money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment method chosen at checkout
///
/// `Cash` is "Pay at Counter", `Mobile` is "Pay Now".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Mobile,
}

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Status only moves forward: PENDING → PAID → COMPLETED.
    /// CANCELLED is reachable from PENDING and PAID.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Paid) | (Paid, Completed) | (Pending, Cancelled) | (Paid, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Orders that count towards revenue
    pub fn is_settled(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Completed)
    }
}

/// Order line: snapshot of a menu item plus quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub menu_item_id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub section: MenuSection,
    pub quantity: i32,
}

impl OrderItem {
    pub fn from_menu_item(item: &MenuItem, quantity: i32) -> Self {
        Self {
            menu_item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
            section: item.section,
            quantity,
        }
    }

    pub fn line_total(&self) -> f64 {
        money::to_f64(money::line_total(self.price, self.quantity))
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    pub table_id: Option<i64>,
    pub table_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Section of the order for analytics: BAR when every line is a drink
    pub fn section(&self) -> MenuSection {
        if !self.items.is_empty() && self.items.iter().all(|i| i.section == MenuSection::Bar) {
            MenuSection::Bar
        } else {
            MenuSection::Kitchen
        }
    }
}

/// One requested checkout line; prices are resolved server-side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutLine {
    pub menu_item_id: i64,
    pub quantity: i32,
}

/// POST /api/orders payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: Option<i64>,
    pub table_name: Option<String>,
    pub payment_method: PaymentMethod,
    pub items: Vec<CheckoutLine>,
}

/// PATCH /api/orders/{id} payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Status filter used by the admin order list (`ALL` or one status)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderFilter {
    #[default]
    All,
    Pending,
    Paid,
    Completed,
    Cancelled,
}

impl OrderFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Pending => status == OrderStatus::Pending,
            OrderFilter::Paid => status == OrderStatus::Paid,
            OrderFilter::Completed => status == OrderStatus::Completed,
            OrderFilter::Cancelled => status == OrderStatus::Cancelled,
        }
    }
}

/// GET /api/orders query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub status: OrderFilter,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_moves_forward_only() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Paid));
        assert!(Paid.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Paid.can_transition_to(Cancelled));

        assert!(!Paid.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Paid));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        let method: PaymentMethod = serde_json::from_str("\"MOBILE\"").unwrap();
        assert_eq!(method, PaymentMethod::Mobile);
        let filter: OrderFilter = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(filter, OrderFilter::All);
    }

    #[test]
    fn test_filter_matches() {
        assert!(OrderFilter::All.matches(OrderStatus::Cancelled));
        assert!(OrderFilter::Paid.matches(OrderStatus::Paid));
        assert!(!OrderFilter::Paid.matches(OrderStatus::Completed));
    }
}
