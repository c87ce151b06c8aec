//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::CartItemNotFound
            | Self::MenuItemNotFound
            | Self::TableNotFound
            | Self::ReservationNotFound
            | Self::EventNotFound
            | Self::StaffNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::OrderAlreadyCompleted
            | Self::OrderAlreadyCancelled
            | Self::NoTableAvailable
            | Self::TableNameExists
            | Self::StaffEmailExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::LastAdminRequired
            | Self::StaffCannotDeleteSelf => StatusCode::FORBIDDEN,

            // 422 Unprocessable (business rules)
            Self::MinimumSpendNotMet
            | Self::MenuItemUnavailable
            | Self::OrderInvalidTransition
            | Self::ReservationInvalidTransition => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
