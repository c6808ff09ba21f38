//! Shared parsing for form and query parameters.
//!
//! IDs arrive as decimal strings in form fields. Non-numeric input parses
//! as `0`, which every required ID rejects.

use waypoint_core::error::CoreError;
use waypoint_core::sanitize::parse_int_or_zero;
use waypoint_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Parse an ID form field, treating `0` or garbage as "not set".
pub fn optional_id(raw: &str) -> Option<DbId> {
    match parse_int_or_zero(raw) {
        0 => None,
        id => Some(id),
    }
}

/// Parse an ID form field that must be present and non-zero.
pub fn require_id(raw: &str, field: &str) -> AppResult<DbId> {
    optional_id(raw)
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("{field} is required"))))
}

/// Reject non-positive IDs taken from a path segment.
pub fn require_positive(id: DbId, field: &str) -> AppResult<DbId> {
    if id > 0 {
        Ok(id)
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "{field} must be a positive integer"
        ))))
    }
}

/// Extract the action type from an `_{actionType}` path segment.
pub fn action_type_from_key(key: &str) -> AppResult<&str> {
    key.strip_prefix('_')
        .filter(|action_type| !action_type.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Malformed action key '{key}'")))
}
