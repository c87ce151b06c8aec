//! Order book
//!
//! Checkout rebuilds the cart server-side from the catalog, so prices and
//! availability always come from the current menu rather than the client.

use chrono::Utc;
use parking_lot::RwLock;
use shared::models::{Order, OrderCreate, OrderQuery, OrderStatus, Page};
use shared::{AppError, Cart};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::admin::{filters, paginate};
use crate::catalog::MenuCatalog;
use crate::utils::{AppResult, ErrorCode};

#[derive(Debug)]
pub struct OrderBook {
    orders: RwLock<Vec<Order>>,
    next_id: AtomicI64,
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        .with_detail("id", id)
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Build the order from the requested lines and store it as PENDING
    pub fn checkout(&self, catalog: &MenuCatalog, payload: OrderCreate) -> AppResult<Order> {
        if payload.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let mut cart = Cart::new();
        for line in &payload.items {
            let item = catalog.get(line.menu_item_id)?;
            cart.add_quantity(&item, line.quantity)?;
        }

        let order = Order {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            table_id: payload.table_id,
            table_name: payload.table_name,
            total: cart.total(),
            items: cart.into_lines(),
            payment_method: payload.payment_method,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        self.orders.write().push(order.clone());
        tracing::info!(
            order_id = order.id,
            total = order.total,
            lines = order.items.len(),
            "Order placed"
        );
        Ok(order)
    }

    pub fn all(&self) -> Vec<Order> {
        self.orders.read().clone()
    }

    /// Newest first, filtered by status, paginated
    pub fn list(&self, query: &OrderQuery, default_page_size: u32) -> Page<Order> {
        let mut orders = filters::filter_orders(&self.orders.read(), query.status);
        orders.reverse();
        paginate(orders, query.page, query.page_size, default_page_size)
    }

    pub fn get(&self, id: i64) -> AppResult<Order> {
        self.orders
            .read()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub fn update_status(&self, id: i64, next: OrderStatus) -> AppResult<Order> {
        let mut orders = self.orders.write();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found(id))?;

        if !order.status.can_transition_to(next) {
            let code = match order.status {
                OrderStatus::Completed => ErrorCode::OrderAlreadyCompleted,
                OrderStatus::Cancelled => ErrorCode::OrderAlreadyCancelled,
                _ => ErrorCode::OrderInvalidTransition,
            };
            return Err(AppError::with_message(
                code,
                format!("Cannot move order {} from {:?} to {:?}", id, order.status, next),
            )
            .with_detail("from", format!("{:?}", order.status).to_uppercase())
            .with_detail("to", format!("{:?}", next).to_uppercase()));
        }

        let from = order.status;
        order.status = next;
        tracing::info!(order_id = id, ?from, to = ?next, "Order status changed");
        Ok(order.clone())
    }

    pub fn delete(&self, id: i64) -> AppResult<Order> {
        let mut orders = self.orders.write();
        let idx = orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = orders.remove(idx);
        tracing::info!(order_id = id, "Order deleted");
        Ok(removed)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
