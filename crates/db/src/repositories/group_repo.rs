//! Repository for the `user_groups` reference table.

use sqlx::SqlitePool;
use waypoint_core::types::DbId;

use crate::models::group::Group;

/// Read access to user groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Find a group by its primary key.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Group>, sqlx::Error> {
        sqlx::query_as::<_, Group>("SELECT id, name FROM user_groups WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
