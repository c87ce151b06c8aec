//! Unified error system for the lounge backend
//!
//! - [`ErrorCode`]: stable numeric codes shared by server and client
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`AppError`]: error with code, message and structured details
//! - [`ApiResponse`]: the `{code, message, data?, details?}` envelope
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::validation("time_slot is required").with_detail("field", "time_slot");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
