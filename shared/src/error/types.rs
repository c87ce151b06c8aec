//! Error types and API response envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error carried from the domain layer up to the HTTP boundary
///
/// Holds a stable [`ErrorCode`], a human readable message and optional
/// structured details (offending field, missing amount, resource id).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// `"{resource} not found"` with the resource name recorded in details
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// No staff session on a protected route
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }
}

/// Unified API response envelope
///
/// `code` is 0 on success; `data` is present on success and `details`
/// on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(0),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        matches!(self.code, Some(0) | None)
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new_uses_default_message() {
        let err = AppError::new(ErrorCode::NoTableAvailable);
        assert_eq!(err.code, ErrorCode::NoTableAvailable);
        assert_eq!(err.message, "No table available for the requested slot");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::MinimumSpendNotMet)
            .with_detail("required", 2500.0)
            .with_detail("shortfall", 700.0);

        let details = err.details.unwrap();
        assert_eq!(details.get("required").unwrap(), 2500.0);
        assert_eq!(details.get("shortfall").unwrap(), 700.0);
    }

    #[test]
    fn test_not_found_records_resource() {
        let err = AppError::not_found("Reservation 7");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Reservation 7 not found");
        assert_eq!(
            err.details.as_ref().unwrap().get("resource").unwrap(),
            "Reservation 7"
        );
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Order 12 not found");
        assert_eq!(format!("{}", err), "Order 12 not found");
    }

    #[test]
    fn test_envelope_success_shape() {
        let response = ApiResponse::success(vec![1, 2]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "OK");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("details").is_none());
        assert!(response.is_success());
    }

    #[test]
    fn test_envelope_error_shape() {
        let err = AppError::validation("time_slot is required").with_detail("field", "time_slot");
        let response: ApiResponse<String> = err.into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["code"], 2);
        assert_eq!(json["message"], "time_slot is required");
        assert!(json.get("data").is_none());
        assert_eq!(json["details"]["field"], "time_slot");
        assert!(!response.is_success());
    }

    #[test]
    fn test_envelope_deserialize() {
        let json = r#"{"code":7002,"message":"No table","details":{"table_type":"VIP"}}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(response.code, Some(7002));
        assert!(response.data.is_none());
        assert_eq!(response.details.unwrap()["table_type"], "VIP");
    }
}
