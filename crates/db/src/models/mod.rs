//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` form structs for the raw request payloads
//! - Internal input structs carrying already-sanitized values
//!
//! JSON field names follow the public API (`workflowID`, `stepTitle`, ...),
//! not the column names.

pub mod action;
pub mod dependency;
pub mod group;
pub mod route;
pub mod step;
pub mod workflow;

use serde::Serializer;

/// Serialize a boolean flag as `0` / `1`.
pub(crate) fn flag_as_int<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}
