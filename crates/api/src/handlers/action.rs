//! Handlers for the action catalog.
//!
//! Action text and icon come straight from administrators' form input and
//! are shown to every requestor, so they are scrubbed here before they
//! reach the repository.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Form, Json};
use waypoint_core::error::CoreError;
use waypoint_core::sanitize::{action_type_from_text, parse_int_or_zero, scrub_filename, strip_tags};
use waypoint_core::types::DbId;
use waypoint_db::models::action::{ActionForm, ActionInput};
use waypoint_db::repositories::{ActionRepo, RouteRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::step::find_step;
use crate::query::action_type_from_key;
use crate::response::confirmed;
use crate::state::AppState;

/// Sanitize a raw action form.
fn sanitize_action(form: &ActionForm) -> ActionInput {
    ActionInput {
        action_text: strip_tags(&form.action_text),
        action_text_pasttense: strip_tags(&form.action_text_pasttense),
        action_icon: scrub_filename(&form.action_icon),
        sort: parse_int_or_zero(&form.sort),
        fill_dependency: parse_int_or_zero(&form.fill_dependency),
    }
}

/// GET /api/workflow/actions
pub async fn list_actions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let actions = ActionRepo::list_active(&state.pool).await?;
    Ok(Json(actions))
}

/// GET /api/workflow/action/_{type}
///
/// Always an array: one entry for an active action, empty otherwise.
pub async fn get_actions_by_type(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let action_type = action_type_from_key(&key)?;
    let action = ActionRepo::find_by_type(&state.pool, action_type).await?;
    Ok(Json(action.into_iter().collect::<Vec<_>>()))
}

/// POST /api/system/action
///
/// The action type is derived from the sanitized text. Returns the type as
/// a JSON string. A soft-deleted action with the same type is revived.
pub async fn create_action(
    State(state): State<AppState>,
    Form(form): Form<ActionForm>,
) -> AppResult<impl IntoResponse> {
    let input = sanitize_action(&form);
    let action_type = action_type_from_text(&input.action_text);
    if action_type.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "actionText must contain at least one letter, digit or underscore".into(),
        )));
    }

    let action = ActionRepo::create(&state.pool, &action_type, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Action '{action_type}' already exists"
            )))
        })?;

    tracing::info!(action_type = %action.action_type, sort = action.sort, "Action created");

    Ok(Json(action.action_type))
}

/// POST /api/workflow/editAction/_{type}
///
/// Overwrites every field of an active action.
pub async fn edit_action(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Form(form): Form<ActionForm>,
) -> AppResult<impl IntoResponse> {
    let action_type = action_type_from_key(&key)?;
    let input = sanitize_action(&form);

    ActionRepo::update(&state.pool, action_type, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Action",
                key: action_type.to_string(),
            })
        })?;

    tracing::info!(action_type, "Action updated");

    Ok(confirmed())
}

/// DELETE /api/workflow/action/_{type}
///
/// Soft delete. Routes offering the action are removed with it.
pub async fn delete_action(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let action_type = action_type_from_key(&key)?;
    let deleted = ActionRepo::soft_delete(&state.pool, action_type).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFoundByKey {
            entity: "Action",
            key: action_type.to_string(),
        }));
    }

    tracing::info!(action_type, "Action deleted");

    Ok(confirmed())
}

/// GET /api/workflow/step/{id}/actions
///
/// Actions offered by the step's routes, ordered by sort value.
pub async fn list_step_actions(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_step(&state.pool, step_id).await?;
    let actions = RouteRepo::step_actions(&state.pool, step_id).await?;
    Ok(Json(actions))
}
