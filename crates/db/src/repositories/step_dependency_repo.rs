//! Repository for the `step_dependencies` link table.

use sqlx::SqlitePool;
use waypoint_core::dependency::resolved_description;
use waypoint_core::designator::{DesignatorField, UNSET_INDICATOR};
use waypoint_core::types::DbId;

use crate::models::dependency::StepDependency;

/// Links dependencies to workflow steps.
pub struct StepDependencyRepo;

impl StepDependencyRepo {
    /// Attach a dependency to a step. Linking twice is a no-op.
    pub async fn link(
        pool: &SqlitePool,
        step_id: DbId,
        dependency_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO step_dependencies (step_id, dependency_id)
             VALUES (?1, ?2)
             ON CONFLICT (step_id, dependency_id) DO NOTHING",
        )
        .bind(step_id)
        .bind(dependency_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Detach a dependency from a step.
    ///
    /// When a link was removed and `reset` names a designator field, that
    /// field is cleared in the same transaction. Returns `true` if a link
    /// was removed.
    pub async fn unlink(
        pool: &SqlitePool,
        step_id: DbId,
        dependency_id: DbId,
        reset: Option<DesignatorField>,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result =
            sqlx::query("DELETE FROM step_dependencies WHERE step_id = ?1 AND dependency_id = ?2")
                .bind(step_id)
                .bind(dependency_id)
                .execute(&mut *tx)
                .await?;

        let removed = result.rows_affected() > 0;

        if let Some(field) = reset.filter(|_| removed) {
            let query = format!(
                "UPDATE workflow_steps SET {} = ?1 WHERE id = ?2",
                field.column()
            );
            sqlx::query(&query)
                .bind(UNSET_INDICATOR)
                .bind(step_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(removed)
    }

    /// Resolve every dependency linked to a step for display.
    ///
    /// A dependency with several privileged groups yields one entry per
    /// group. Entries are ordered by dependency ID, then group ID.
    pub async fn list_for_step(
        pool: &SqlitePool,
        step_id: DbId,
    ) -> Result<Vec<StepDependency>, sqlx::Error> {
        let rows = sqlx::query_as::<_, StepDependency>(
            "SELECT sd.dependency_id,
                    d.description,
                    s.indicator_id_for_assigned_emp_uid,
                    s.indicator_id_for_assigned_group_id,
                    COALESCE(p.group_id, 0) AS group_id,
                    COALESCE(g.name, '') AS name
             FROM step_dependencies sd
             JOIN workflow_steps s ON s.id = sd.step_id
             JOIN dependencies d ON d.id = sd.dependency_id
             LEFT JOIN dependency_privileges p ON p.dependency_id = sd.dependency_id
             LEFT JOIN user_groups g ON g.id = p.group_id
             WHERE sd.step_id = ?1
             ORDER BY sd.dependency_id, COALESCE(p.group_id, 0)",
        )
        .bind(step_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|mut row| {
                row.description =
                    resolved_description(row.dependency_id, &row.description).to_string();
                row
            })
            .collect())
    }
}
