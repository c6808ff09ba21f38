//! Route definitions for system administration.

use axum::routing::post;
use axum::Router;

use crate::handlers::action;
use crate::state::AppState;

/// Routes mounted at `/system`.
///
/// ```text
/// POST   /action            -> create_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/action", post(action::create_action))
}
