//! PostgreSQL implementation of MilestoneRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use trellis_core::entities::{Milestone, Task};
use trellis_core::traits::{MilestoneRepository, RepoResult};
use trellis_core::value_objects::Snowflake;
use trellis_core::DomainError;

use crate::models::{MilestoneModel, TaskModel};

use super::error::{map_db_error, map_unique_violation, milestone_not_found};

/// PostgreSQL implementation of MilestoneRepository
#[derive(Clone)]
pub struct PgMilestoneRepository {
    pool: PgPool,
}

impl PgMilestoneRepository {
    /// Create a new PgMilestoneRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MilestoneRepository for PgMilestoneRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Milestone>> {
        let result = sqlx::query_as::<_, MilestoneModel>(
            r"
            SELECT id, project_id, organization_id, name, description, target_date,
                   status, created_by, created_at, updated_at
            FROM milestones
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Milestone::from))
    }

    #[instrument(skip(self))]
    async fn find_by_project(&self, project_id: Snowflake) -> RepoResult<Vec<Milestone>> {
        let results = sqlx::query_as::<_, MilestoneModel>(
            r"
            SELECT id, project_id, organization_id, name, description, target_date,
                   status, created_by, created_at, updated_at
            FROM milestones
            WHERE project_id = $1
            ORDER BY target_date NULLS LAST, id
            ",
        )
        .bind(project_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Milestone::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, milestone: &Milestone) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO milestones (id, project_id, organization_id, name, description,
                                    target_date, status, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(milestone.id.into_inner())
        .bind(milestone.project_id.into_inner())
        .bind(milestone.organization_id.into_inner())
        .bind(&milestone.name)
        .bind(&milestone.description)
        .bind(milestone.target_date)
        .bind(milestone.status.as_str())
        .bind(milestone.created_by.into_inner())
        .bind(milestone.created_at)
        .bind(milestone.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, milestone: &Milestone) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE milestones
            SET name = $2, description = $3, target_date = $4, status = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(milestone.id.into_inner())
        .bind(&milestone.name)
        .bind(&milestone.description)
        .bind(milestone.target_date)
        .bind(milestone.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(milestone_not_found(milestone.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Cascades to milestone_tasks
        let result = sqlx::query(
            r"
            DELETE FROM milestones WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(milestone_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn attach_task(&self, milestone_id: Snowflake, task_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO milestone_tasks (milestone_id, task_id)
            VALUES ($1, $2)
            ",
        )
        .bind(milestone_id.into_inner())
        .bind(task_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TaskAlreadyAttached))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn detach_task(&self, milestone_id: Snowflake, task_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM milestone_tasks
            WHERE milestone_id = $1 AND task_id = $2
            ",
        )
        .bind(milestone_id.into_inner())
        .bind(task_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(task_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_tasks(&self, milestone_id: Snowflake) -> RepoResult<Vec<Task>> {
        let results = sqlx::query_as::<_, TaskModel>(
            r"
            SELECT t.id, t.project_id, t.organization_id, t.name, t.description,
                   t.assignee_id, t.due_date, t.status, t.position, t.created_at, t.updated_at
            FROM tasks t
            JOIN milestone_tasks mt ON mt.task_id = t.id
            WHERE mt.milestone_id = $1
            ORDER BY t.status, t.position, t.id
            ",
        )
        .bind(milestone_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Task::from).collect())
    }

    #[instrument(skip(self))]
    async fn task_counts(&self, milestone_id: Snowflake) -> RepoResult<(i64, i64)> {
        let row = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE t.status = 'DONE')
            FROM milestone_tasks mt
            JOIN tasks t ON t.id = mt.task_id
            WHERE mt.milestone_id = $1
            ",
        )
        .bind(milestone_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMilestoneRepository>();
    }
}
