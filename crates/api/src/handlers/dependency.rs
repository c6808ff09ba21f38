//! Handlers for the dependency registry: catalog entries, group privileges
//! and step links.
//!
//! Every handler classifies the incoming dependency ID with
//! [`DependencyKind::classify`] before touching the database, so a
//! rejected request never mutates anything.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::{Form, Json};
use waypoint_core::dependency::DependencyKind;
use waypoint_core::error::CoreError;
use waypoint_core::sanitize::strip_tags;
use waypoint_core::types::DbId;
use waypoint_db::models::dependency::{
    Dependency, DependencyDescriptionForm, GroupPrivilegeForm, StepDependencyForm,
};
use waypoint_db::models::group::Group;
use waypoint_db::models::step::WorkflowStep;
use waypoint_db::repositories::{DependencyRepo, GroupRepo, StepDependencyRepo};
use waypoint_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::step::{find_step, find_step_in_workflow};
use crate::query::{optional_id, require_id};
use crate::response::{confirmed, created_id};
use crate::state::AppState;

async fn find_dependency(pool: &DbPool, dependency_id: DbId) -> AppResult<Dependency> {
    DependencyRepo::find_by_id(pool, dependency_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dependency",
            id: dependency_id,
        }))
}

async fn find_group(pool: &DbPool, group_id: DbId) -> AppResult<Group> {
    GroupRepo::find_by_id(pool, group_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: group_id,
        }))
}

/// Resolve the step addressed by a link or unlink request. Step `0` is
/// rejected, and a non-zero `workflowID` must own the step.
async fn find_linked_step(
    pool: &DbPool,
    step_id: DbId,
    form: &StepDependencyForm,
) -> AppResult<WorkflowStep> {
    if step_id <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "stepID is required".into(),
        )));
    }
    match optional_id(&form.workflow_id) {
        Some(workflow_id) => find_step_in_workflow(pool, workflow_id, step_id).await,
        None => find_step(pool, step_id).await,
    }
}

fn require_description(raw: &str) -> AppResult<String> {
    let description = strip_tags(raw);
    if description.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "description is required".into(),
        )));
    }
    Ok(description)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// GET /api/workflow/dependencies
///
/// Lists every dependency a step can be linked to.
pub async fn list_dependencies(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let dependencies = DependencyRepo::list_assignable(&state.pool).await?;
    Ok(Json(dependencies))
}

/// POST /api/workflow/dependencies
///
/// Returns the new dependency ID as a JSON string. Custom IDs are always
/// above the built-in range.
pub async fn create_dependency(
    State(state): State<AppState>,
    Form(form): Form<DependencyDescriptionForm>,
) -> AppResult<impl IntoResponse> {
    let description = require_description(&form.description)?;
    let dependency = DependencyRepo::create(&state.pool, &description).await?;

    tracing::info!(dependency_id = dependency.id, "Dependency created");

    Ok(created_id(dependency.id))
}

/// POST /api/workflow/dependency/{id}
pub async fn update_dependency(
    State(state): State<AppState>,
    Path(dependency_id): Path<DbId>,
    Form(form): Form<DependencyDescriptionForm>,
) -> AppResult<impl IntoResponse> {
    DependencyKind::classify(dependency_id)?.ensure_editable()?;
    let description = require_description(&form.description)?;

    DependencyRepo::update_description(&state.pool, dependency_id, &description)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dependency",
            id: dependency_id,
        }))?;

    tracing::info!(dependency_id, "Dependency description updated");

    Ok(confirmed())
}

// ---------------------------------------------------------------------------
// Group privileges
// ---------------------------------------------------------------------------

/// GET /api/workflow/dependency/{id}/privileges
pub async fn list_privileges(
    State(state): State<AppState>,
    Path(dependency_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_dependency(&state.pool, dependency_id).await?;
    let groups = DependencyRepo::privileged_groups(&state.pool, dependency_id).await?;
    Ok(Json(groups))
}

/// POST /api/workflow/dependency/{id}/privileges
///
/// Granting the same group twice is a no-op.
pub async fn grant_privilege(
    State(state): State<AppState>,
    Path(dependency_id): Path<DbId>,
    Form(form): Form<GroupPrivilegeForm>,
) -> AppResult<impl IntoResponse> {
    DependencyKind::classify(dependency_id)?.ensure_privileges_allowed()?;
    let group_id = require_id(&form.group_id, "groupID")?;

    find_dependency(&state.pool, dependency_id).await?;
    find_group(&state.pool, group_id).await?;

    DependencyRepo::grant_privilege(&state.pool, dependency_id, group_id).await?;

    tracing::info!(dependency_id, group_id, "Group privilege granted");

    Ok(confirmed())
}

/// DELETE /api/workflow/dependency/{id}/privileges?groupID=..
pub async fn revoke_privilege(
    State(state): State<AppState>,
    Path(dependency_id): Path<DbId>,
    Query(params): Query<GroupPrivilegeForm>,
) -> AppResult<impl IntoResponse> {
    DependencyKind::classify(dependency_id)?.ensure_privileges_allowed()?;
    let group_id = require_id(&params.group_id, "groupID")?;

    let revoked = DependencyRepo::revoke_privilege(&state.pool, dependency_id, group_id).await?;

    tracing::info!(dependency_id, group_id, revoked, "Group privilege revoked");

    Ok(confirmed())
}

// ---------------------------------------------------------------------------
// Step links
// ---------------------------------------------------------------------------

/// GET /api/workflow/step/{id}/dependencies
///
/// One entry per (dependency, privileged group), ordered by dependency ID
/// then group ID.
pub async fn list_step_dependencies(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_step(&state.pool, step_id).await?;
    let entries = StepDependencyRepo::list_for_step(&state.pool, step_id).await?;
    Ok(Json(entries))
}

/// POST /api/workflow/step/{id}/dependencies
///
/// Links a dependency to the step. A non-zero `workflowID` must match the
/// step's workflow. Linking twice is a no-op.
pub async fn link_dependency(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
    Form(form): Form<StepDependencyForm>,
) -> AppResult<impl IntoResponse> {
    let kind = DependencyKind::classify(require_id(&form.dependency_id, "dependencyID")?)?;
    kind.ensure_linkable()?;
    find_linked_step(&state.pool, step_id, &form).await?;

    let dependency_id = kind.id();
    find_dependency(&state.pool, dependency_id).await?;

    StepDependencyRepo::link(&state.pool, step_id, dependency_id).await?;

    tracing::info!(step_id, dependency_id, "Dependency linked to step");

    Ok(confirmed())
}

/// DELETE /api/workflow/step/{id}/dependencies?dependencyID=..&workflowID=..
///
/// Removing a designated dependency link also clears the step's matching
/// designator indicator. The step is checked the same way as for linking.
pub async fn unlink_dependency(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
    Query(params): Query<StepDependencyForm>,
) -> AppResult<impl IntoResponse> {
    let kind = DependencyKind::classify(require_id(&params.dependency_id, "dependencyID")?)?;
    kind.ensure_linkable()?;
    find_linked_step(&state.pool, step_id, &params).await?;

    let reset = match kind {
        DependencyKind::Reserved(reserved) => reserved.designator(),
        _ => None,
    };

    let removed =
        StepDependencyRepo::unlink(&state.pool, step_id, kind.id(), reset).await?;

    tracing::info!(
        step_id,
        dependency_id = kind.id(),
        removed,
        "Dependency unlinked from step",
    );

    Ok(confirmed())
}
