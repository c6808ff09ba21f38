//! Workflow editor layout rules.

use crate::sanitize::parse_int_or_zero;

/// Smallest coordinate a step can be placed at.
pub const MIN_COORDINATE: i64 = 0;

/// Clamp a coordinate to the editor canvas.
pub fn clamp_coordinate(value: i64) -> i64 {
    value.max(MIN_COORDINATE)
}

/// Parse and clamp a coordinate submitted as a form field.
pub fn parse_coordinate(raw: &str) -> i64 {
    clamp_coordinate(parse_int_or_zero(raw))
}
