//! PostgreSQL implementation of TaskRepository

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use tracing::{instrument, warn};

use trellis_core::entities::{FieldChange, Task};
use trellis_core::traits::{RepoResult, TaskPositionUpdate, TaskQuery, TaskRepository};
use trellis_core::value_objects::Snowflake;
use trellis_core::TaskStatus;

use crate::models::TaskModel;

use super::error::{map_db_error, task_not_found};

/// PostgreSQL implementation of TaskRepository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Task>> {
        let result = sqlx::query_as::<_, TaskModel>(
            r"
            SELECT id, project_id, organization_id, name, description, assignee_id,
                   due_date, status, position, created_at, updated_at
            FROM tasks
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Task::from))
    }

    #[instrument(skip(self, query))]
    async fn find_by_project(
        &self,
        project_id: Snowflake,
        query: TaskQuery,
    ) -> RepoResult<Vec<Task>> {
        let limit = query.limit.clamp(1, 1000);

        let mut builder = QueryBuilder::<sqlx::Postgres>::new(
            "SELECT id, project_id, organization_id, name, description, assignee_id, \
             due_date, status, position, created_at, updated_at \
             FROM tasks WHERE project_id = ",
        );
        builder.push_bind(project_id.into_inner());

        if let Some(status) = query.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(assignee_id) = query.assignee_id {
            builder.push(" AND assignee_id = ");
            builder.push_bind(assignee_id.into_inner());
        }
        if let Some(due_before) = query.due_before {
            builder.push(" AND due_date IS NOT NULL AND due_date < ");
            builder.push_bind(due_before);
        }
        if let Some(after) = query.after {
            builder.push(" AND id > ");
            builder.push_bind(after.into_inner());
        }

        // Board order within a column, stable across columns
        builder.push(" ORDER BY status, position, id LIMIT ");
        builder.push_bind(limit);

        let results = builder
            .build_query_as::<TaskModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Task::from).collect())
    }

    #[instrument(skip(self))]
    async fn max_position(
        &self,
        project_id: Snowflake,
        status: TaskStatus,
    ) -> RepoResult<Option<i32>> {
        let max = sqlx::query_scalar::<_, Option<i32>>(
            r"
            SELECT MAX(position) FROM tasks
            WHERE project_id = $1 AND status = $2
            ",
        )
        .bind(project_id.into_inner())
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(max)
    }

    #[instrument(skip(self))]
    async fn create(&self, task: &Task) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO tasks (id, project_id, organization_id, name, description,
                               assignee_id, due_date, status, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(task.id.into_inner())
        .bind(task.project_id.into_inner())
        .bind(task.organization_id.into_inner())
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.assignee_id.map(Snowflake::into_inner))
        .bind(task.due_date)
        .bind(task.status.as_str())
        .bind(task.position)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, changes, log_ids))]
    async fn update_with_log(
        &self,
        task: &Task,
        changes: &[FieldChange],
        changed_by: Snowflake,
        log_ids: &[Snowflake],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE tasks
            SET name = $2, description = $3, assignee_id = $4, due_date = $5,
                status = $6, position = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(task.id.into_inner())
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.assignee_id.map(Snowflake::into_inner))
        .bind(task.due_date)
        .bind(task.status.as_str())
        .bind(task.position)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(task_not_found(task.id));
        }

        // Audit rows ride the same transaction, but a failed insert must
        // never take the mutation down with it.
        for (change, log_id) in changes.iter().zip(log_ids) {
            let inserted = sqlx::query(
                r"
                INSERT INTO task_change_logs
                    (id, task_id, organization_id, field_name, old_value, new_value, changed_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(log_id.into_inner())
            .bind(task.id.into_inner())
            .bind(task.organization_id.into_inner())
            .bind(change.field_name)
            .bind(&change.old_value)
            .bind(&change.new_value)
            .bind(changed_by.into_inner())
            .execute(&mut *tx)
            .await;

            if let Err(e) = inserted {
                warn!(
                    task_id = %task.id,
                    field = change.field_name,
                    error = %e,
                    "Failed to record task change log entry"
                );
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, updates))]
    async fn update_positions(
        &self,
        project_id: Snowflake,
        updates: &[TaskPositionUpdate],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for update in updates {
            let result = sqlx::query(
                r"
                UPDATE tasks
                SET status = $3, position = $4, updated_at = NOW()
                WHERE id = $1 AND project_id = $2
                ",
            )
            .bind(update.task_id.into_inner())
            .bind(project_id.into_inner())
            .bind(update.status.as_str())
            .bind(update.position)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                // Task missing or from another project; abort the whole batch
                return Err(task_not_found(update.task_id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Cascades to milestone_tasks and task_change_logs
        let result = sqlx::query(
            r"
            DELETE FROM tasks WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(task_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTaskRepository>();
    }
}
