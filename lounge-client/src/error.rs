//! Client error types

use serde::Deserialize;
use serde_json::Value;
use shared::ErrorCode;
use std::collections::HashMap;
use thiserror::Error;

/// 服务端返回的错误响应格式
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub details: Option<HashMap<String, Value>>,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with an error envelope
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error, raised before anything is sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The same action is already in flight
    #[error("Already submitting: {0}")]
    DuplicateSubmission(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Local storage failure
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Typed error code: the server's, or a transport class for HTTP failures
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            ClientError::Http(e) if e.is_timeout() => Some(ErrorCode::TimeoutError),
            ClientError::Http(_) => Some(ErrorCode::NetworkError),
            _ => None,
        }
    }

    /// Text for a guest-facing notice
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Http(_) => self
                .code()
                .map_or("Network error", |code| code.message())
                .to_string(),
            other => other.to_string(),
        }
    }

    /// One entry of the server's `details` map
    pub fn detail(&self, key: &str) -> Option<&Value> {
        match self {
            ClientError::Api {
                details: Some(details),
                ..
            } => details.get(key),
            _ => None,
        }
    }

    /// Whether the session token should be discarded
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
            || matches!(
                self.code(),
                Some(ErrorCode::NotAuthenticated | ErrorCode::TokenExpired | ErrorCode::TokenInvalid)
            )
    }
}

impl From<shared::AppError> for ClientError {
    fn from(err: shared::AppError) -> Self {
        ClientError::Api {
            code: err.code.code(),
            message: err.message,
            details: err.details,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AppError;

    #[test]
    fn test_app_error_keeps_code_and_details() {
        let err: ClientError = AppError::new(ErrorCode::MinimumSpendNotMet)
            .with_detail("shortfall", 500.0)
            .into();
        assert_eq!(err.code(), Some(ErrorCode::MinimumSpendNotMet));
        assert_eq!(err.detail("shortfall"), Some(&Value::from(500.0)));
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_token_errors_are_auth_failures() {
        let err: ClientError = AppError::token_expired().into();
        assert!(err.is_auth_failure());
        assert!(ClientError::Unauthorized.is_auth_failure());
    }

    #[test]
    fn test_transport_failure_has_network_code() {
        let err: ClientError = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err()
            .into();
        assert_eq!(err.code(), Some(ErrorCode::NetworkError));
        assert_eq!(err.user_message(), "Network error");
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_user_message_is_server_text() {
        let err: ClientError = AppError::with_message(
            ErrorCode::NoTableAvailable,
            "No VIP table available for 2026-11-07 22:00",
        )
        .into();
        assert_eq!(err.user_message(), "No VIP table available for 2026-11-07 22:00");
    }
}
