//! Repository for the `dependencies` and `dependency_privileges` tables.

use sqlx::SqlitePool;
use waypoint_core::dependency::{ReservedDependency, MAX_BUILT_IN_ID};
use waypoint_core::types::DbId;

use crate::models::dependency::Dependency;
use crate::models::group::Group;

/// Provides CRUD operations for dependencies and their group privileges.
pub struct DependencyRepo;

impl DependencyRepo {
    /// Insert a custom dependency, returning the created row.
    ///
    /// The ID is allocated above both the built-in range and every existing
    /// ID, so custom dependencies never collide with catalog entries.
    pub async fn create(pool: &SqlitePool, description: &str) -> Result<Dependency, sqlx::Error> {
        sqlx::query_as::<_, Dependency>(
            "INSERT INTO dependencies (id, description)
             SELECT MAX(COALESCE(MAX(id), 0), ?1) + 1, ?2 FROM dependencies
             RETURNING id, description",
        )
        .bind(MAX_BUILT_IN_ID)
        .bind(description)
        .fetch_one(pool)
        .await
    }

    /// Find a dependency by its primary key.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Dependency>, sqlx::Error> {
        sqlx::query_as::<_, Dependency>("SELECT id, description FROM dependencies WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every dependency that can be assigned to a step, ordered by ID.
    pub async fn list_assignable(pool: &SqlitePool) -> Result<Vec<Dependency>, sqlx::Error> {
        sqlx::query_as::<_, Dependency>(
            "SELECT id, description FROM dependencies WHERE id <> ?1 ORDER BY id",
        )
        .bind(ReservedDependency::SystemAgent.id())
        .fetch_all(pool)
        .await
    }

    /// Replace the description, returning the updated row.
    pub async fn update_description(
        pool: &SqlitePool,
        id: DbId,
        description: &str,
    ) -> Result<Option<Dependency>, sqlx::Error> {
        sqlx::query_as::<_, Dependency>(
            "UPDATE dependencies SET description = ?1 WHERE id = ?2 RETURNING id, description",
        )
        .bind(description)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Group privileges
    // -----------------------------------------------------------------------

    /// Grant `group_id` privileges on a dependency. Granting twice is a no-op.
    pub async fn grant_privilege(
        pool: &SqlitePool,
        dependency_id: DbId,
        group_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO dependency_privileges (dependency_id, group_id)
             VALUES (?1, ?2)
             ON CONFLICT (dependency_id, group_id) DO NOTHING",
        )
        .bind(dependency_id)
        .bind(group_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Revoke a group's privileges. Returns `true` if a grant was removed.
    pub async fn revoke_privilege(
        pool: &SqlitePool,
        dependency_id: DbId,
        group_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM dependency_privileges WHERE dependency_id = ?1 AND group_id = ?2",
        )
        .bind(dependency_id)
        .bind(group_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Groups holding privileges on a dependency, ordered by group ID.
    pub async fn privileged_groups(
        pool: &SqlitePool,
        dependency_id: DbId,
    ) -> Result<Vec<Group>, sqlx::Error> {
        sqlx::query_as::<_, Group>(
            "SELECT g.id, g.name
             FROM dependency_privileges p
             JOIN user_groups g ON g.id = p.group_id
             WHERE p.dependency_id = ?1
             ORDER BY g.id",
        )
        .bind(dependency_id)
        .fetch_all(pool)
        .await
    }
}
