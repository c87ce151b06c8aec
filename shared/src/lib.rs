//! Shared types for the lounge backend
//!
//! Domain models, the unified error system, the API response envelope and
//! the pure order-side rules (cart accumulator, minimum-spend policy) used by
//! both `lounge-server` and `lounge-client`.

pub mod cart;
pub mod client;
pub mod error;
pub mod models;
pub mod money;
pub mod policy;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use cart::{Cart, CartError, CartNotice};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use policy::{MinimumSpendPolicy, MinimumSpendShortfall, PolicyError};
