//! Repository for the `workflows` table.

use sqlx::SqlitePool;
use waypoint_core::types::DbId;

use crate::models::workflow::Workflow;

/// Column list for workflows queries.
const COLUMNS: &str = "id, initial_step_id, description, created_at, updated_at";

/// Provides CRUD operations for workflows.
pub struct WorkflowRepo;

impl WorkflowRepo {
    /// Insert a new workflow, returning the created row.
    pub async fn create(pool: &SqlitePool, description: &str) -> Result<Workflow, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflows (description) VALUES (?1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workflow>(&query)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// Find a workflow by its primary key.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Workflow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflows WHERE id = ?1");
        sqlx::query_as::<_, Workflow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all workflows ordered by ID.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Workflow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflows ORDER BY id");
        sqlx::query_as::<_, Workflow>(&query).fetch_all(pool).await
    }

    /// Replace the description, returning the updated row.
    pub async fn update_description(
        pool: &SqlitePool,
        id: DbId,
        description: &str,
    ) -> Result<Option<Workflow>, sqlx::Error> {
        let query = format!(
            "UPDATE workflows SET
                description = ?1,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workflow>(&query)
            .bind(description)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Point the workflow at its entry step. Returns `true` if a row was updated.
    ///
    /// The caller is responsible for checking that the step belongs to the
    /// workflow.
    pub async fn set_initial_step(
        pool: &SqlitePool,
        id: DbId,
        step_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE workflows SET
                initial_step_id = ?1,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ?2",
        )
        .bind(step_id)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a workflow together with its steps, their dependency links and
    /// every route in the workflow. Returns `true` if the workflow existed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM workflow_routes WHERE workflow_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM step_dependencies
             WHERE step_id IN (SELECT id FROM workflow_steps WHERE workflow_id = ?1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let steps = sqlx::query("DELETE FROM workflow_steps WHERE workflow_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM workflows WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            workflow_id = id,
            steps_removed = steps.rows_affected(),
            "Workflow cascade delete finished",
        );

        Ok(result.rows_affected() > 0)
    }
}
