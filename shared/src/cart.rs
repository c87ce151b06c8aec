//! Cart accumulator
//!
//! Session-scoped collection of selected menu items pending checkout.
//! One line per menu item, in the order items were first added. The total is
//! always recomputed from the lines, never stored.

use crate::error::{AppError, ErrorCode};
use crate::models::{MenuItem, MenuSection, OrderItem};
use crate::money::{self, MAX_QUANTITY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Cart errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("{0} is currently unavailable")]
    ItemUnavailable(String),

    #[error("Item {0} is not in the cart")]
    NotInCart(i64),

    #[error("Quantity must be between 1 and {max}, got {quantity}")]
    InvalidQuantity { quantity: i32, max: i32 },
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match &err {
            CartError::ItemUnavailable(name) => {
                AppError::with_message(ErrorCode::MenuItemUnavailable, err.to_string())
                    .with_detail("name", name.clone())
            }
            CartError::NotInCart(id) => {
                AppError::with_message(ErrorCode::CartItemNotFound, err.to_string())
                    .with_detail("menu_item_id", *id)
            }
            CartError::InvalidQuantity { quantity, .. } => {
                AppError::with_message(ErrorCode::InvalidQuantity, err.to_string())
                    .with_detail("quantity", *quantity)
            }
        }
    }
}

/// What a cart mutation did, surfaced to the user as a transient notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartNotice {
    Added { name: String },
    Incremented { name: String, quantity: i32 },
    Decremented { name: String, quantity: i32 },
    Removed { name: String },
}

impl fmt::Display for CartNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartNotice::Added { name } => write!(f, "{} added to order", name),
            CartNotice::Incremented { name, quantity } => {
                write!(f, "{} x{} in order", name, quantity)
            }
            CartNotice::Decremented { name, quantity } => {
                write!(f, "{} reduced to x{}", name, quantity)
            }
            CartNotice::Removed { name } => write!(f, "{} removed from order", name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<OrderItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the item or increment its quantity by one
    pub fn add_item(&mut self, item: &MenuItem) -> Result<CartNotice, CartError> {
        self.add_quantity(item, 1)
    }

    /// Insert the item or increment its quantity by `quantity`
    ///
    /// Nothing changes when the item is unavailable or the resulting
    /// quantity is out of range.
    pub fn add_quantity(&mut self, item: &MenuItem, quantity: i32) -> Result<CartNotice, CartError> {
        if !item.is_available {
            return Err(CartError::ItemUnavailable(item.name.clone()));
        }
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity {
                quantity,
                max: MAX_QUANTITY,
            });
        }

        match self.lines.iter().position(|l| l.menu_item_id == item.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                let next = line.quantity.saturating_add(quantity);
                if next > MAX_QUANTITY {
                    return Err(CartError::InvalidQuantity {
                        quantity: next,
                        max: MAX_QUANTITY,
                    });
                }
                line.quantity = next;
                Ok(CartNotice::Incremented {
                    name: line.name.clone(),
                    quantity: next,
                })
            }
            None => {
                if quantity > MAX_QUANTITY {
                    return Err(CartError::InvalidQuantity {
                        quantity,
                        max: MAX_QUANTITY,
                    });
                }
                self.lines.push(OrderItem::from_menu_item(item, quantity));
                if quantity == 1 {
                    Ok(CartNotice::Added {
                        name: item.name.clone(),
                    })
                } else {
                    Ok(CartNotice::Incremented {
                        name: item.name.clone(),
                        quantity,
                    })
                }
            }
        }
    }

    /// Decrement the item's quantity, deleting the line at zero
    pub fn remove_item(&mut self, menu_item_id: i64) -> Result<CartNotice, CartError> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.menu_item_id == menu_item_id)
            .ok_or(CartError::NotInCart(menu_item_id))?;

        let line = &mut self.lines[idx];
        if line.quantity > 1 {
            line.quantity -= 1;
            return Ok(CartNotice::Decremented {
                name: line.name.clone(),
                quantity: line.quantity,
            });
        }

        let removed = self.lines.remove(idx);
        Ok(CartNotice::Removed { name: removed.name })
    }

    /// Σ price × quantity over current lines
    pub fn total(&self) -> f64 {
        money::to_f64(self.fold(|_| true))
    }

    /// Σ price × quantity over BAR lines only
    pub fn drink_total(&self) -> f64 {
        money::to_f64(self.fold(|l| l.section == MenuSection::Bar))
    }

    fn fold(&self, include: impl Fn(&OrderItem) -> bool) -> Decimal {
        self.lines
            .iter()
            .filter(|l| include(l))
            .map(|l| money::line_total(l.price, l.quantity))
            .sum()
    }

    /// Total units across all lines
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn lines(&self) -> &[OrderItem] {
        &self.lines
    }

    pub fn quantity_of(&self, menu_item_id: i64) -> i32 {
        self.lines
            .iter()
            .find(|l| l.menu_item_id == menu_item_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Consume the cart into its order lines
    pub fn into_lines(self) -> Vec<OrderItem> {
        self.lines
    }
}
