//! Workflow step models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waypoint_core::types::DbId;

/// A row from the `workflow_steps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowStep {
    #[serde(rename = "stepID")]
    pub id: DbId,
    #[serde(rename = "workflowID")]
    pub workflow_id: DbId,
    #[serde(rename = "stepTitle")]
    pub step_title: String,
    #[serde(rename = "posX")]
    pub pos_x: i64,
    #[serde(rename = "posY")]
    pub pos_y: i64,
    #[serde(rename = "indicatorID_for_assigned_empUID")]
    pub indicator_id_for_assigned_emp_uid: i64,
    #[serde(rename = "indicatorID_for_assigned_groupID")]
    pub indicator_id_for_assigned_group_id: i64,
}

/// Form body for `POST /workflow/{id}/step` and `POST /workflow/step/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepTitleForm {
    #[serde(default, rename = "stepTitle")]
    pub step_title: String,
}

/// Form body for `POST /workflow/{id}/editorPosition`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorPositionForm {
    #[serde(default, rename = "stepID")]
    pub step_id: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
}

/// Form body for `POST /workflow/step/{id}/{designator field}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndicatorForm {
    #[serde(default, rename = "indicatorID")]
    pub indicator_id: String,
}
