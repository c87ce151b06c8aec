//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64` on the wire. Every sum or product goes through
//! `Decimal` and is rounded back to 2 places, half away from zero.

use crate::error::{AppError, ErrorCode};
use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per menu item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per cart line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// price × quantity
pub fn line_total(price: f64, quantity: i32) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

/// Sum a sequence of amounts exactly
pub fn sum<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64(amounts.into_iter().map(to_decimal).sum())
}

/// Check whether two amounts are equal within one cent
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}

/// Reject NaN / Infinity
#[inline]
pub fn require_finite(value: f64, field_name: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{} must be a finite number, got {}", field_name, value),
        )
        .with_detail("field", field_name));
    }
    Ok(())
}

/// Validate a menu price: finite, non-negative, below [`MAX_PRICE`]
pub fn validate_price(price: f64) -> Result<(), AppError> {
    require_finite(price, "price")?;
    if !(0.0..=MAX_PRICE).contains(&price) {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            format!("price must be between 0 and {}, got {}", MAX_PRICE, price),
        )
        .with_detail("field", "price"));
    }
    Ok(())
}

/// Validate a line quantity: positive, at most [`MAX_QUANTITY`]
pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity <= 0 || quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!(
                "quantity must be between 1 and {}, got {}",
                MAX_QUANTITY, quantity
            ),
        )
        .with_detail("field", "quantity"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_f64_rounds_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(12345, 3)), 12.35);
        assert_eq!(to_f64(Decimal::new(-12345, 3)), -12.35);
    }

    #[test]
    fn test_sum_avoids_float_drift() {
        assert_eq!(sum([0.1, 0.2]), 0.3);
        assert_eq!(sum([19.99, 19.99, 19.99]), 59.97);
        assert_eq!(sum(std::iter::empty::<f64>()), 0.0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(to_f64(line_total(4.5, 3)), 13.5);
        assert_eq!(to_f64(line_total(1200.0, 2)), 2400.0);
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(10.0, 10.004));
        assert!(!money_eq(10.0, 10.02));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(2500.0).is_ok());
        assert_eq!(
            validate_price(-1.0).unwrap_err().code,
            ErrorCode::MenuItemInvalidPrice
        );
        assert_eq!(
            validate_price(f64::NAN).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert!(validate_price(MAX_PRICE + 1.0).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert_eq!(
            validate_quantity(0).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }
}
