//! User group reference data.

use serde::Serialize;
use sqlx::FromRow;
use waypoint_core::types::DbId;

/// A row from the `user_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    #[serde(rename = "groupID")]
    pub id: DbId,
    pub name: String,
}
