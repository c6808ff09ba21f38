//! Handlers for workflows and their routes.
//!
//! Route handlers live here rather than in `step` because a route is
//! addressed through its workflow (`/workflow/{id}/route`).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::{Form, Json};
use waypoint_core::error::CoreError;
use waypoint_core::sanitize::{parse_int_or_zero, strip_tags};
use waypoint_core::types::DbId;
use waypoint_db::models::route::{CreateRoute, RouteForm, END_OF_WORKFLOW};
use waypoint_db::models::workflow::{InitialStepForm, Workflow, WorkflowDescriptionForm};
use waypoint_db::repositories::{ActionRepo, RouteRepo, WorkflowRepo};
use waypoint_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::step::find_step_in_workflow;
use crate::query::require_id;
use crate::response::{confirmed, created_id};
use crate::state::AppState;

/// Load a workflow or fail with 404.
pub(crate) async fn find_workflow(pool: &DbPool, workflow_id: DbId) -> AppResult<Workflow> {
    WorkflowRepo::find_by_id(pool, workflow_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workflow",
            id: workflow_id,
        }))
}

// ---------------------------------------------------------------------------
// Workflow CRUD
// ---------------------------------------------------------------------------

/// GET /api/workflow
pub async fn list_workflows(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workflows = WorkflowRepo::list(&state.pool).await?;
    Ok(Json(workflows))
}

/// POST /api/workflow/new
///
/// Returns the new workflow ID as a JSON string.
pub async fn create_workflow(
    State(state): State<AppState>,
    Form(form): Form<WorkflowDescriptionForm>,
) -> AppResult<impl IntoResponse> {
    let description = strip_tags(&form.description);
    let workflow = WorkflowRepo::create(&state.pool, &description).await?;

    tracing::info!(workflow_id = workflow.id, "Workflow created");

    Ok(created_id(workflow.id))
}

/// GET /api/workflow/{id}
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let workflow = find_workflow(&state.pool, workflow_id).await?;
    Ok(Json(workflow))
}

/// POST /api/workflow/{id}
pub async fn update_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
    Form(form): Form<WorkflowDescriptionForm>,
) -> AppResult<impl IntoResponse> {
    let description = strip_tags(&form.description);
    WorkflowRepo::update_description(&state.pool, workflow_id, &description)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workflow",
            id: workflow_id,
        }))?;

    tracing::info!(workflow_id, "Workflow description updated");

    Ok(confirmed())
}

/// DELETE /api/workflow/{id}
///
/// Removes the workflow with its steps, dependency links and routes.
pub async fn delete_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WorkflowRepo::delete(&state.pool, workflow_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Workflow",
            id: workflow_id,
        }));
    }

    tracing::info!(workflow_id, "Workflow deleted");

    Ok(confirmed())
}

/// POST /api/workflow/{id}/initialStep
///
/// The step must belong to the workflow.
pub async fn set_initial_step(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
    Form(form): Form<InitialStepForm>,
) -> AppResult<impl IntoResponse> {
    let step_id = require_id(&form.step_id, "stepID")?;
    find_workflow(&state.pool, workflow_id).await?;
    find_step_in_workflow(&state.pool, workflow_id, step_id).await?;

    WorkflowRepo::set_initial_step(&state.pool, workflow_id, step_id).await?;

    tracing::info!(workflow_id, step_id, "Initial step set");

    Ok(confirmed())
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// GET /api/workflow/{id}/route
pub async fn list_routes(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_workflow(&state.pool, workflow_id).await?;
    let routes = RouteRepo::list_by_workflow(&state.pool, workflow_id).await?;
    Ok(Json(routes))
}

/// POST /api/workflow/{id}/route
///
/// Presents `actionType` at `stepID`, leading to `nextStepID` (`0` ends the
/// workflow). Posting the same step and action again retargets the route.
pub async fn create_route(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
    Form(form): Form<RouteForm>,
) -> AppResult<impl IntoResponse> {
    let step_id = require_id(&form.step_id, "stepID")?;
    let next_step_id = parse_int_or_zero(&form.next_step_id);
    let action_type = form.action_type.trim();
    if action_type.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "actionType is required".into(),
        )));
    }

    find_workflow(&state.pool, workflow_id).await?;
    find_step_in_workflow(&state.pool, workflow_id, step_id).await?;
    if next_step_id != END_OF_WORKFLOW {
        find_step_in_workflow(&state.pool, workflow_id, next_step_id).await?;
    }
    ActionRepo::find_by_type(&state.pool, action_type)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Action",
                key: action_type.to_string(),
            })
        })?;

    let route = RouteRepo::upsert(
        &state.pool,
        &CreateRoute {
            workflow_id,
            step_id,
            next_step_id,
            action_type: action_type.to_string(),
        },
    )
    .await?;

    tracing::info!(
        workflow_id,
        step_id,
        next_step_id = route.next_step_id,
        action_type = %route.action_type,
        "Route saved",
    );

    Ok(confirmed())
}

/// DELETE /api/workflow/{id}/route?stepID=..&actionType=..
pub async fn remove_route(
    State(state): State<AppState>,
    Path(workflow_id): Path<DbId>,
    Query(params): Query<RouteForm>,
) -> AppResult<impl IntoResponse> {
    let step_id = require_id(&params.step_id, "stepID")?;
    let action_type = params.action_type.trim();

    let deleted = RouteRepo::delete(&state.pool, workflow_id, step_id, action_type).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFoundByKey {
            entity: "Route",
            key: format!("{workflow_id}/{step_id}/{action_type}"),
        }));
    }

    tracing::info!(workflow_id, step_id, action_type, "Route removed");

    Ok(confirmed())
}
