//! Required-field checks for the submission forms.

use crate::error::ApiError;

/// Trimmed value of a field that must not be blank.
pub fn required(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!("Please fill in {}.", field)));
    }
    Ok(value.to_string())
}

/// Blank optional fields are stored as NULL.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn email(value: &str) -> Result<String, ApiError> {
    let value = required("email", value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => {
            Ok(value)
        }
        _ => Err(ApiError::BadRequest("Please enter a valid email address.".into())),
    }
}
