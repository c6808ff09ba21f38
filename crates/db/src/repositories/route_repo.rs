//! Repository for the `workflow_routes` table.

use sqlx::SqlitePool;
use waypoint_core::types::DbId;

use crate::models::action::StepAction;
use crate::models::route::{CreateRoute, Route};

/// Column list for workflow_routes queries.
const COLUMNS: &str = "workflow_id, step_id, next_step_id, action_type";

/// Provides CRUD operations for routes between workflow steps.
pub struct RouteRepo;

impl RouteRepo {
    /// Create a route, or retarget the existing route for the same
    /// step and action.
    pub async fn upsert(pool: &SqlitePool, input: &CreateRoute) -> Result<Route, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow_routes (workflow_id, step_id, next_step_id, action_type)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (workflow_id, step_id, action_type)
             DO UPDATE SET next_step_id = excluded.next_step_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(input.workflow_id)
            .bind(input.step_id)
            .bind(input.next_step_id)
            .bind(&input.action_type)
            .fetch_one(pool)
            .await
    }

    /// Remove a route. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &SqlitePool,
        workflow_id: DbId,
        step_id: DbId,
        action_type: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM workflow_routes
             WHERE workflow_id = ?1 AND step_id = ?2 AND action_type = ?3",
        )
        .bind(workflow_id)
        .bind(step_id)
        .bind(action_type)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the routes of a workflow ordered by step, then action.
    pub async fn list_by_workflow(
        pool: &SqlitePool,
        workflow_id: DbId,
    ) -> Result<Vec<Route>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_routes
             WHERE workflow_id = ?1
             ORDER BY step_id, action_type"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(workflow_id)
            .fetch_all(pool)
            .await
    }

    /// Actions offered at a step, ordered by the catalog sort value.
    ///
    /// Soft-deleted actions are never offered.
    pub async fn step_actions(
        pool: &SqlitePool,
        step_id: DbId,
    ) -> Result<Vec<StepAction>, sqlx::Error> {
        sqlx::query_as::<_, StepAction>(
            "SELECT a.action_type, a.action_text
             FROM actions a
             WHERE a.deleted = 0
               AND a.action_type IN (SELECT action_type FROM workflow_routes WHERE step_id = ?1)
             ORDER BY a.sort, a.action_type",
        )
        .bind(step_id)
        .fetch_all(pool)
        .await
    }
}
