//! Input validation helpers
//!
//! Bridges `validator` derive errors and free-text checks into [`AppError`].

use crate::utils::AppError;
use validator::{Validate, ValidationErrors};

/// Run `validator` rules on a payload
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(into_app_error)
}

fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort_unstable();

    let message = match fields.first() {
        Some(first) => format!("{} is invalid", first),
        None => "Validation failed".to_string(),
    };

    AppError::validation(message).with_detail("fields", fields.join(","))
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}
