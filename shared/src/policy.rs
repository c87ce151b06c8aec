//! Minimum-spend policy
//!
//! Bar/event reservations may only be checked out once the pre-ordered drink
//! value reaches the bar threshold. Themed event nights scale a table's base
//! minimum by the event multiplier. Both numbers come from configuration.

use crate::error::{AppError, ErrorCode};
use crate::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_BAR_THRESHOLD: f64 = 2500.0;
pub const DEFAULT_EVENT_MULTIPLIER: f64 = 1.5;

/// How far a pre-order falls below the required minimum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumSpendShortfall {
    pub required: f64,
    pub current: f64,
    /// `required - current`
    pub shortfall: f64,
}

impl fmt::Display for MinimumSpendShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Minimum spend of {:.2} not reached: add {:.2} more",
            self.required, self.shortfall
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("{0}")]
    BelowMinimum(MinimumSpendShortfall),

    #[error("Invalid minimum-spend policy: {0}")]
    InvalidConfig(String),
}

impl From<PolicyError> for AppError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::BelowMinimum(s) => {
                AppError::with_message(ErrorCode::MinimumSpendNotMet, s.to_string())
                    .with_detail("required", s.required)
                    .with_detail("current", s.current)
                    .with_detail("shortfall", s.shortfall)
            }
            PolicyError::InvalidConfig(msg) => {
                AppError::with_message(ErrorCode::ConfigError, msg)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumSpendPolicy {
    /// Drink value a bar/event booking must pre-order
    pub bar_threshold: f64,
    /// Scale applied to table minimums on themed nights
    pub event_multiplier: f64,
}

impl Default for MinimumSpendPolicy {
    fn default() -> Self {
        Self {
            bar_threshold: DEFAULT_BAR_THRESHOLD,
            event_multiplier: DEFAULT_EVENT_MULTIPLIER,
        }
    }
}

impl MinimumSpendPolicy {
    pub fn new(bar_threshold: f64, event_multiplier: f64) -> Result<Self, PolicyError> {
        if !bar_threshold.is_finite() || bar_threshold < 0.0 {
            return Err(PolicyError::InvalidConfig(format!(
                "bar threshold must be a non-negative number, got {}",
                bar_threshold
            )));
        }
        if !event_multiplier.is_finite() || event_multiplier <= 0.0 {
            return Err(PolicyError::InvalidConfig(format!(
                "event multiplier must be positive, got {}",
                event_multiplier
            )));
        }
        Ok(Self {
            bar_threshold,
            event_multiplier,
        })
    }

    /// Check a bar-mode pre-order against the threshold
    pub fn check_bar(&self, drink_total: f64) -> Result<(), PolicyError> {
        check_minimum(self.bar_threshold, drink_total)
    }

    /// Effective table minimum: `base × multiplier` on themed nights
    pub fn table_minimum(&self, base: f64, themed: bool) -> f64 {
        if themed {
            to_f64(to_decimal(base) * to_decimal(self.event_multiplier))
        } else {
            to_f64(to_decimal(base))
        }
    }

    /// Deposit taken to hold a table: half the effective minimum
    pub fn deposit(&self, minimum: f64) -> f64 {
        to_f64(to_decimal(minimum) / Decimal::TWO)
    }
}

/// `Ok` when `current ≥ required`, otherwise the exact shortfall
pub fn check_minimum(required: f64, current: f64) -> Result<(), PolicyError> {
    let required_d = to_decimal(required);
    let current_d = to_decimal(current);
    if current_d >= required_d {
        return Ok(());
    }
    Err(PolicyError::BelowMinimum(MinimumSpendShortfall {
        required: to_f64(required_d),
        current: to_f64(current_d),
        shortfall: to_f64(required_d - current_d),
    }))
}
