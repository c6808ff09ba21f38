//! Repository for the `actions` table.
//!
//! Actions are soft-deleted: `deleted = 1` rows stay in the table so a later
//! create with the same type can revive them, but every read path here
//! filters them out.

use sqlx::SqlitePool;

use crate::models::action::{Action, ActionInput};

/// Column list for actions queries.
const COLUMNS: &str = "action_type, action_text, action_text_pasttense, action_icon, \
    sort, fill_dependency, deleted, created_at, updated_at";

/// Provides CRUD operations for the action catalog.
pub struct ActionRepo;

impl ActionRepo {
    /// Insert an action, or revive a soft-deleted action of the same type.
    ///
    /// Returns `None` when an active action with this type already exists.
    pub async fn create(
        pool: &SqlitePool,
        action_type: &str,
        input: &ActionInput,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!(
            "INSERT INTO actions
                (action_type, action_text, action_text_pasttense, action_icon,
                 sort, fill_dependency)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (action_type) DO UPDATE SET
                action_text = excluded.action_text,
                action_text_pasttense = excluded.action_text_pasttense,
                action_icon = excluded.action_icon,
                sort = excluded.sort,
                fill_dependency = excluded.fill_dependency,
                deleted = 0,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE actions.deleted = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(action_type)
            .bind(&input.action_text)
            .bind(&input.action_text_pasttense)
            .bind(&input.action_icon)
            .bind(input.sort)
            .bind(input.fill_dependency)
            .fetch_optional(pool)
            .await
    }

    /// Find an active action by type.
    pub async fn find_by_type(
        pool: &SqlitePool,
        action_type: &str,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM actions WHERE action_type = ?1 AND deleted = 0");
        sqlx::query_as::<_, Action>(&query)
            .bind(action_type)
            .fetch_optional(pool)
            .await
    }

    /// List active actions ordered by sort value, then type.
    pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Action>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actions WHERE deleted = 0 ORDER BY sort, action_type"
        );
        sqlx::query_as::<_, Action>(&query).fetch_all(pool).await
    }

    /// Overwrite every editable field of an active action.
    pub async fn update(
        pool: &SqlitePool,
        action_type: &str,
        input: &ActionInput,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!(
            "UPDATE actions SET
                action_text = ?1,
                action_text_pasttense = ?2,
                action_icon = ?3,
                sort = ?4,
                fill_dependency = ?5,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE action_type = ?6 AND deleted = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(&input.action_text)
            .bind(&input.action_text_pasttense)
            .bind(&input.action_icon)
            .bind(input.sort)
            .bind(input.fill_dependency)
            .bind(action_type)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an action and drop the routes that offered it.
    ///
    /// Returns `true` if an active action was deleted.
    pub async fn soft_delete(pool: &SqlitePool, action_type: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE actions SET
                deleted = 1,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE action_type = ?1 AND deleted = 0",
        )
        .bind(action_type)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() > 0 {
            sqlx::query("DELETE FROM workflow_routes WHERE action_type = ?1")
                .bind(action_type)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
