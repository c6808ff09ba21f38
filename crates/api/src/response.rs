//! Scalar response bodies.
//!
//! Mutating endpoints answer with a bare JSON string rather than an object:
//! `"1"` to confirm, or the new record's ID (`"17"`) after a create.

use axum::Json;
use waypoint_core::types::DbId;

/// Body returned by every successful mutation that creates nothing.
pub const CONFIRMED: &str = "1";

/// `"1"` as a JSON string.
pub fn confirmed() -> Json<&'static str> {
    Json(CONFIRMED)
}

/// A newly allocated ID, encoded as a JSON string.
pub fn created_id(id: DbId) -> Json<String> {
    Json(id.to_string())
}
