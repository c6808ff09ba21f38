//! Route definitions for workflows, steps, dependencies and actions.
//!
//! Everything here is mounted at `/workflow`. Static segments such as
//! `/step`, `/dependencies` and `/actions` take priority over the `{id}`
//! captures they overlap with.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{action, dependency, step, workflow};
use crate::state::AppState;

/// Routes mounted at `/workflow`.
///
/// ```text
/// GET    /                               -> list_workflows
/// POST   /new                            -> create_workflow
/// GET    /{id}                           -> get_workflow
/// POST   /{id}                           -> update_workflow
/// DELETE /{id}                           -> delete_workflow
/// GET    /{id}/steps                     -> list_steps
/// POST   /{id}/step                      -> create_step
/// POST   /{id}/initialStep               -> set_initial_step
/// POST   /{id}/editorPosition            -> set_editor_position
/// GET    /{id}/route                     -> list_routes
/// POST   /{id}/route                     -> create_route
/// DELETE /{id}/route                     -> remove_route
///
/// GET    /step/{id}                      -> get_step
/// POST   /step/{id}                      -> update_step_title
/// DELETE /step/{id}                      -> delete_step
/// GET    /step/{id}/dependencies         -> list_step_dependencies
/// POST   /step/{id}/dependencies         -> link_dependency
/// DELETE /step/{id}/dependencies         -> unlink_dependency
/// GET    /step/{id}/actions              -> list_step_actions
/// POST   /step/{id}/{field}              -> set_designator
///
/// GET    /dependencies                   -> list_dependencies
/// POST   /dependencies                   -> create_dependency
/// POST   /dependency/{id}                -> update_dependency
/// GET    /dependency/{id}/privileges     -> list_privileges
/// POST   /dependency/{id}/privileges     -> grant_privilege
/// DELETE /dependency/{id}/privileges     -> revoke_privilege
///
/// GET    /actions                        -> list_actions
/// GET    /action/_{type}                 -> get_actions_by_type
/// DELETE /action/_{type}                 -> delete_action
/// POST   /editAction/_{type}             -> edit_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Workflows
        .route("/", get(workflow::list_workflows))
        .route("/new", post(workflow::create_workflow))
        .route(
            "/{id}",
            get(workflow::get_workflow)
                .post(workflow::update_workflow)
                .delete(workflow::delete_workflow),
        )
        .route("/{id}/steps", get(step::list_steps))
        .route("/{id}/step", post(step::create_step))
        .route("/{id}/initialStep", post(workflow::set_initial_step))
        .route("/{id}/editorPosition", post(step::set_editor_position))
        .route(
            "/{id}/route",
            get(workflow::list_routes)
                .post(workflow::create_route)
                .delete(workflow::remove_route),
        )
        // Steps
        .route(
            "/step/{id}",
            get(step::get_step)
                .post(step::update_step_title)
                .delete(step::delete_step),
        )
        .route(
            "/step/{id}/dependencies",
            get(dependency::list_step_dependencies)
                .post(dependency::link_dependency)
                .delete(dependency::unlink_dependency),
        )
        .route("/step/{id}/actions", get(action::list_step_actions))
        .route("/step/{id}/{field}", post(step::set_designator))
        // Dependencies
        .route(
            "/dependencies",
            get(dependency::list_dependencies).post(dependency::create_dependency),
        )
        .route("/dependency/{id}", post(dependency::update_dependency))
        .route(
            "/dependency/{id}/privileges",
            get(dependency::list_privileges)
                .post(dependency::grant_privilege)
                .delete(dependency::revoke_privilege),
        )
        // Actions
        .route("/actions", get(action::list_actions))
        .route(
            "/action/{key}",
            get(action::get_actions_by_type).delete(action::delete_action),
        )
        .route("/editAction/{key}", post(action::edit_action))
}
