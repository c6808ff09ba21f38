//! Handlers for workflow steps: creation, layout, titles and designator
//! indicators.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Form, Json};
use waypoint_core::designator::DesignatorField;
use waypoint_core::error::CoreError;
use waypoint_core::layout::parse_coordinate;
use waypoint_core::sanitize::{parse_int_or_zero, strip_tags};
use waypoint_core::types::DbId;
use waypoint_db::models::step::{EditorPositionForm, IndicatorForm, StepTitleForm, WorkflowStep};
use waypoint_db::repositories::StepRepo;
use waypoint_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::workflow::find_workflow;
use crate::query::{require_id, require_positive};
use crate::response::{confirmed, created_id};
use crate::state::AppState;

/// Load a step or fail with 404.
pub(crate) async fn find_step(pool: &DbPool, step_id: DbId) -> AppResult<WorkflowStep> {
    StepRepo::find_by_id(pool, step_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Step",
            id: step_id,
        }))
}

/// Load a step that must belong to `workflow_id`. A step from another
/// workflow is reported as missing.
pub(crate) async fn find_step_in_workflow(
    pool: &DbPool,
    workflow_id: DbId,
    step_id: DbId,
) -> AppResult<WorkflowStep> {
    let step = find_step(pool, step_id).await?;
    if step.workflow_id != workflow_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Step",
            id: step_id,
        }));
    }
    Ok(step)
}

fn require_title(raw: &str) -> AppResult<String> {
    let title = strip_tags(raw);
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "stepTitle is required".into(),
        )));
    }
    Ok(title)
}

// ---------------------------------------------------------------------------
// Workflow-scoped step endpoints
// ---------------------------------------------------------------------------

/// GET /api/workflow/{id}/steps
pub async fn list_steps(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_workflow(&state.pool, workflow_id).await?;
    let steps = StepRepo::list_by_workflow(&state.pool, workflow_id).await?;
    Ok(Json(steps))
}

/// POST /api/workflow/{id}/step
///
/// Returns the new step ID as a JSON string. The first step of a workflow
/// becomes its initial step.
pub async fn create_step(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
    Form(form): Form<StepTitleForm>,
) -> AppResult<impl IntoResponse> {
    let workflow_id = require_positive(workflow_id, "workflowID")?;
    let title = require_title(&form.step_title)?;
    find_workflow(&state.pool, workflow_id).await?;

    let step = StepRepo::create(&state.pool, workflow_id, &title).await?;

    tracing::info!(workflow_id, step_id = step.id, "Workflow step created");

    Ok(created_id(step.id))
}

/// POST /api/workflow/{id}/editorPosition
///
/// Negative or non-numeric coordinates are stored as `0`.
pub async fn set_editor_position(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
    Form(form): Form<EditorPositionForm>,
) -> AppResult<impl IntoResponse> {
    let step_id = require_id(&form.step_id, "stepID")?;
    let x = parse_coordinate(&form.x);
    let y = parse_coordinate(&form.y);

    let updated = StepRepo::set_position(&state.pool, workflow_id, step_id, x, y).await?;

    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Step",
            id: step_id,
        }));
    }

    tracing::debug!(workflow_id, step_id, x, y, "Step position stored");

    Ok(confirmed())
}

// ---------------------------------------------------------------------------
// Step endpoints
// ---------------------------------------------------------------------------

/// GET /api/workflow/step/{id}
pub async fn get_step(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let step = find_step(&state.pool, step_id).await?;
    Ok(Json(step))
}

/// POST /api/workflow/step/{id}
pub async fn update_step_title(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
    Form(form): Form<StepTitleForm>,
) -> AppResult<impl IntoResponse> {
    let title = require_title(&form.step_title)?;

    StepRepo::update_title(&state.pool, step_id, &title)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Step",
            id: step_id,
        }))?;

    tracing::info!(step_id, "Step title updated");

    Ok(confirmed())
}

/// DELETE /api/workflow/step/{id}
///
/// Removes the step, its dependency links and every route from or to it.
pub async fn delete_step(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = StepRepo::delete(&state.pool, step_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Step",
            id: step_id,
        }));
    }

    tracing::info!(step_id, "Workflow step deleted");

    Ok(confirmed())
}

/// POST /api/workflow/step/{id}/{field}
///
/// `field` is `indicatorID_for_assigned_empUID` or
/// `indicatorID_for_assigned_groupID`. Binding an indicator does not
/// require the matching designated dependency to be linked.
pub async fn set_designator(
    State(state): State<AppState>,
    Path((step_id, field)): Path<(DbId, String)>,
    Form(form): Form<IndicatorForm>,
) -> AppResult<impl IntoResponse> {
    let field = DesignatorField::from_field_name(&field)?;
    let indicator_id = parse_int_or_zero(&form.indicator_id);
    if indicator_id < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "indicatorID must not be negative".into(),
        )));
    }

    let updated = StepRepo::set_indicator(&state.pool, step_id, field, indicator_id).await?;

    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Step",
            id: step_id,
        }));
    }

    tracing::info!(
        step_id,
        field = field.field_name(),
        dependency_id = field.paired_dependency().id(),
        indicator_id,
        "Step designator indicator set",
    );

    Ok(confirmed())
}
