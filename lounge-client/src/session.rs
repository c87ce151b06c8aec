//! Customer session
//!
//! Holds the cart for the current visit plus the queue of short notices
//! shown after each cart action. Nothing here is persisted.

use chrono::NaiveDate;
use shared::models::{
    CheckoutLine, MenuItem, OrderCreate, PaymentMethod, ReservationCreate, ReservationMode,
    TableType,
};
use shared::{AppError, AppResult, Cart, CartError, ErrorCode, MinimumSpendPolicy};
use std::collections::VecDeque;

/// 通知队列上限
const MAX_NOTIFICATIONS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// What the guest filled in on the reservation form
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub table_type: TableType,
    pub customer_name: String,
    pub phone: String,
    pub reservation_date: NaiveDate,
    pub time_slot: String,
    pub mode: ReservationMode,
    pub event_id: Option<i64>,
    pub join_waitlist: bool,
}

#[derive(Debug, Default)]
pub struct CustomerSession {
    cart: Cart,
    notifications: VecDeque<Notification>,
}

impl CustomerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        if self.notifications.len() == MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification {
            kind,
            message: message.into(),
        });
    }

    /// Take every pending notice, oldest first
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn record(&mut self, result: Result<shared::CartNotice, CartError>) -> Result<(), CartError> {
        match result {
            Ok(notice) => {
                self.notify(NotificationKind::Success, notice.to_string());
                Ok(())
            }
            Err(e) => {
                self.notify(NotificationKind::Error, e.to_string());
                Err(e)
            }
        }
    }

    pub fn add_item(&mut self, item: &MenuItem) -> Result<(), CartError> {
        let result = self.cart.add_item(item);
        self.record(result)
    }

    pub fn remove_item(&mut self, menu_item_id: i64) -> Result<(), CartError> {
        let result = self.cart.remove_item(menu_item_id);
        self.record(result)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    fn checkout_lines(&self) -> Vec<CheckoutLine> {
        self.cart
            .lines()
            .iter()
            .map(|l| CheckoutLine {
                menu_item_id: l.menu_item_id,
                quantity: l.quantity,
            })
            .collect()
    }

    /// Checkout payload for the current cart
    pub fn order_request(
        &self,
        payment_method: PaymentMethod,
        table_name: Option<String>,
    ) -> AppResult<OrderCreate> {
        if self.cart.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        Ok(OrderCreate {
            table_id: None,
            table_name,
            payment_method,
            items: self.checkout_lines(),
        })
    }

    /// Reservation payload; bar bookings must clear the drink minimum first
    pub fn reservation_request(
        &self,
        draft: ReservationDraft,
        policy: &MinimumSpendPolicy,
    ) -> AppResult<ReservationCreate> {
        if draft.time_slot.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::TimeSlotRequired,
                "Please select a time slot",
            ));
        }
        if draft.mode == ReservationMode::Bar {
            policy.check_bar(self.cart.drink_total())?;
        }

        Ok(ReservationCreate {
            table_type: draft.table_type,
            customer_name: draft.customer_name,
            phone: draft.phone,
            reservation_date: draft.reservation_date,
            time_slot: draft.time_slot,
            mode: draft.mode,
            event_id: draft.event_id,
            pre_order: self.checkout_lines(),
            join_waitlist: draft.join_waitlist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::MenuSection;

    fn drink(id: i64, name: &str, price: f64) -> MenuItem {
        MenuItem {
            id,
            name: name.into(),
            description: None,
            price,
            category: "Drinks".into(),
            section: MenuSection::Bar,
            is_available: true,
            popular: false,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft(mode: ReservationMode, time_slot: &str) -> ReservationDraft {
        ReservationDraft {
            table_type: TableType::Vip,
            customer_name: "Ama".into(),
            phone: "0244000000".into(),
            reservation_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            time_slot: time_slot.into(),
            mode,
            event_id: None,
            join_waitlist: false,
        }
    }

    #[test]
    fn test_cart_actions_queue_notices() {
        let mut session = CustomerSession::new();
        let mojito = drink(5, "Mojito", 90.0);
        session.add_item(&mojito).unwrap();
        session.add_item(&mojito).unwrap();
        session.remove_item(5).unwrap();
        assert!(session.remove_item(42).is_err());

        let notices = session.drain_notifications();
        let messages: Vec<_> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Mojito added to order",
                "Mojito x2 in order",
                "Mojito reduced to x1",
                "Item 42 is not in the cart",
            ]
        );
        assert_eq!(notices[3].kind, NotificationKind::Error);
        assert!(session.drain_notifications().is_empty());
    }

    #[test]
    fn test_notification_queue_is_bounded() {
        let mut session = CustomerSession::new();
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            session.notify(NotificationKind::Info, format!("n{}", i));
        }
        let notices = session.drain_notifications();
        assert_eq!(notices.len(), MAX_NOTIFICATIONS);
        assert_eq!(notices[0].message, "n5");
    }

    #[test]
    fn test_empty_cart_cannot_checkout() {
        let session = CustomerSession::new();
        let err = session.order_request(PaymentMethod::Cash, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_bar_draft_checked_against_policy() {
        let mut session = CustomerSession::new();
        let moet = drink(8, "Moët", 1000.0);
        session.add_item(&moet).unwrap();
        session.add_item(&moet).unwrap();

        let policy = MinimumSpendPolicy::default();
        let err = session
            .reservation_request(draft(ReservationMode::Bar, "22:00"), &policy)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MinimumSpendNotMet);
        assert_eq!(err.details.unwrap()["shortfall"], 500.0);

        // table mode has no drink minimum
        let request = session
            .reservation_request(draft(ReservationMode::Table, "22:00"), &policy)
            .unwrap();
        assert_eq!(request.pre_order.len(), 1);
        assert_eq!(request.pre_order[0].quantity, 2);
    }

    #[test]
    fn test_blank_slot_rejected_before_policy() {
        let session = CustomerSession::new();
        let err = session
            .reservation_request(draft(ReservationMode::Bar, "  "), &MinimumSpendPolicy::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TimeSlotRequired);
    }
}
