//! Workflow route models and DTOs.
//!
//! A route presents an action at a step and names the step it leads to.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waypoint_core::types::DbId;

/// Next-step value meaning "the workflow ends here".
pub const END_OF_WORKFLOW: DbId = 0;

/// A row from the `workflow_routes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Route {
    #[serde(rename = "workflowID")]
    pub workflow_id: DbId,
    #[serde(rename = "stepID")]
    pub step_id: DbId,
    #[serde(rename = "nextStepID")]
    pub next_step_id: DbId,
    #[serde(rename = "actionType")]
    pub action_type: String,
}

/// Form body (or query string) for creating and removing routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteForm {
    #[serde(default, rename = "stepID")]
    pub step_id: String,
    #[serde(default, rename = "nextStepID")]
    pub next_step_id: String,
    #[serde(default, rename = "actionType")]
    pub action_type: String,
}

/// Validated route fields.
#[derive(Debug, Clone)]
pub struct CreateRoute {
    pub workflow_id: DbId,
    pub step_id: DbId,
    pub next_step_id: DbId,
    pub action_type: String,
}
