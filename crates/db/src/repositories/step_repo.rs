//! Repository for the `workflow_steps` table.

use sqlx::SqlitePool;
use waypoint_core::designator::DesignatorField;
use waypoint_core::types::DbId;

use crate::models::step::WorkflowStep;

/// Column list for workflow_steps queries.
const COLUMNS: &str = "id, workflow_id, step_title, pos_x, pos_y, \
    indicator_id_for_assigned_emp_uid, indicator_id_for_assigned_group_id";

/// Provides CRUD operations for workflow steps.
pub struct StepRepo;

impl StepRepo {
    /// Insert a new step under `workflow_id`, returning the created row.
    ///
    /// If the workflow has no initial step yet, the new step becomes it.
    pub async fn create(
        pool: &SqlitePool,
        workflow_id: DbId,
        step_title: &str,
    ) -> Result<WorkflowStep, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO workflow_steps (workflow_id, step_title)
             VALUES (?1, ?2)
             RETURNING {COLUMNS}"
        );
        let step = sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(workflow_id)
            .bind(step_title)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE workflows
             SET initial_step_id = ?1,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ?2 AND initial_step_id = 0",
        )
        .bind(step.id)
        .bind(workflow_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(step)
    }

    /// Find a step by its primary key.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<WorkflowStep>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflow_steps WHERE id = ?1");
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the steps of a workflow ordered by ID.
    pub async fn list_by_workflow(
        pool: &SqlitePool,
        workflow_id: DbId,
    ) -> Result<Vec<WorkflowStep>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_steps WHERE workflow_id = ?1 ORDER BY id"
        );
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(workflow_id)
            .fetch_all(pool)
            .await
    }

    /// Rename a step, returning the updated row.
    pub async fn update_title(
        pool: &SqlitePool,
        id: DbId,
        step_title: &str,
    ) -> Result<Option<WorkflowStep>, sqlx::Error> {
        let query = format!(
            "UPDATE workflow_steps SET step_title = ?1 WHERE id = ?2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(step_title)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Store editor coordinates for a step of `workflow_id`.
    ///
    /// Coordinates must already be clamped. Returns `true` if the step
    /// exists in that workflow.
    pub async fn set_position(
        pool: &SqlitePool,
        workflow_id: DbId,
        id: DbId,
        pos_x: i64,
        pos_y: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE workflow_steps SET pos_x = ?1, pos_y = ?2
             WHERE id = ?3 AND workflow_id = ?4",
        )
        .bind(pos_x)
        .bind(pos_y)
        .bind(id)
        .bind(workflow_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bind a form indicator to one of the step's designator fields.
    /// Returns `true` if the step exists.
    pub async fn set_indicator(
        pool: &SqlitePool,
        id: DbId,
        field: DesignatorField,
        indicator_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE workflow_steps SET {} = ?1 WHERE id = ?2",
            field.column()
        );
        let result = sqlx::query(&query)
            .bind(indicator_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a step with its dependency links and every route touching it.
    ///
    /// Clears the workflow's initial step if it pointed here. Returns `true`
    /// if the step existed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM step_dependencies WHERE step_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM workflow_routes WHERE step_id = ?1 OR next_step_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE workflows SET initial_step_id = 0 WHERE initial_step_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM workflow_steps WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
