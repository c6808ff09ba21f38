//! Workflow models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waypoint_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `workflows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workflow {
    #[serde(rename = "workflowID")]
    pub id: DbId,
    #[serde(rename = "initialStepID")]
    pub initial_step_id: DbId,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Form payloads
// ---------------------------------------------------------------------------

/// Form body for `POST /workflow/new` and `POST /workflow/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowDescriptionForm {
    #[serde(default)]
    pub description: String,
}

/// Form body for `POST /workflow/{id}/initialStep`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitialStepForm {
    #[serde(default, rename = "stepID")]
    pub step_id: String,
}
