//! Action catalog models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waypoint_core::types::Timestamp;

use super::flag_as_int;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub action_type: String,
    pub action_text: String,
    pub action_text_pasttense: String,
    pub action_icon: String,
    pub sort: i64,
    pub fill_dependency: i64,
    #[serde(serialize_with = "flag_as_int")]
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An action available at a step through one of its routes.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepAction {
    pub action_type: String,
    pub action_text: String,
}

// ---------------------------------------------------------------------------
// Form payloads
// ---------------------------------------------------------------------------

/// Raw form body for creating or editing an action. Every field arrives as
/// text and is sanitized before it reaches the repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionForm {
    #[serde(default, rename = "actionText")]
    pub action_text: String,
    #[serde(default, rename = "actionTextPasttense")]
    pub action_text_pasttense: String,
    #[serde(default, rename = "actionIcon")]
    pub action_icon: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default, rename = "fillDependency")]
    pub fill_dependency: String,
}

// ---------------------------------------------------------------------------
// Repository input
// ---------------------------------------------------------------------------

/// Sanitized action fields, as written by `ActionRepo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInput {
    pub action_text: String,
    pub action_text_pasttense: String,
    pub action_icon: String,
    pub sort: i64,
    pub fill_dependency: i64,
}
