pub mod health;
pub mod system;
pub mod workflow;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workflow                                   list workflows (GET)
/// /workflow/new                               create workflow (POST)
/// /workflow/{id}                              get, update, delete
/// /workflow/{id}/steps                        list steps (GET)
/// /workflow/{id}/step                         create step (POST)
/// /workflow/{id}/initialStep                  set initial step (POST)
/// /workflow/{id}/editorPosition               set step coordinates (POST)
/// /workflow/{id}/route                        list, create, remove (query)
///
/// /workflow/step/{id}                         get, rename, delete
/// /workflow/step/{id}/dependencies            list, link, unlink (query)
/// /workflow/step/{id}/actions                 actions offered at the step (GET)
/// /workflow/step/{id}/{field}                 set designator indicator (POST)
///
/// /workflow/dependencies                      list, create
/// /workflow/dependency/{id}                   update description (POST)
/// /workflow/dependency/{id}/privileges        list, grant, revoke (query)
///
/// /workflow/actions                           list actions (GET)
/// /workflow/action/_{type}                    get, delete
/// /workflow/editAction/_{type}                edit (POST)
///
/// /system/action                              create action (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workflow", workflow::router())
        .nest("/system", system::router())
}
