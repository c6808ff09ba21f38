//! Dependency, group privilege and step-link models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waypoint_core::types::DbId;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `dependencies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dependency {
    #[serde(rename = "dependencyID")]
    pub id: DbId,
    pub description: String,
}

/// A dependency as attached to a step, resolved for display.
///
/// One entry per privileged group; a dependency without privileges yields a
/// single entry with `groupID = 0` and an empty `name`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StepDependency {
    #[serde(rename = "dependencyID")]
    pub dependency_id: DbId,
    pub description: String,
    #[serde(rename = "indicatorID_for_assigned_empUID")]
    pub indicator_id_for_assigned_emp_uid: i64,
    #[serde(rename = "indicatorID_for_assigned_groupID")]
    pub indicator_id_for_assigned_group_id: i64,
    #[serde(rename = "groupID")]
    pub group_id: DbId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Form payloads
// ---------------------------------------------------------------------------

/// Form body for `POST /workflow/dependencies` and `POST /workflow/dependency/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyDescriptionForm {
    #[serde(default)]
    pub description: String,
}

/// Form body (or query string) for linking and unlinking a step dependency.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepDependencyForm {
    #[serde(default, rename = "dependencyID")]
    pub dependency_id: String,
    #[serde(default, rename = "workflowID")]
    pub workflow_id: String,
}

/// Form body (or query string) for granting and revoking group privileges.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupPrivilegeForm {
    #[serde(default, rename = "groupID")]
    pub group_id: String,
}
