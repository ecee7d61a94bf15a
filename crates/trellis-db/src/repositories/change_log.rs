//! PostgreSQL implementation of ChangeLogRepository
//!
//! Read-only: change log rows are written by `PgTaskRepository` inside the
//! task-update transaction and are never modified afterwards.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use trellis_core::entities::TaskChangeLog;
use trellis_core::traits::{ChangeLogRepository, RepoResult};
use trellis_core::value_objects::Snowflake;

use crate::models::ChangeLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ChangeLogRepository
#[derive(Clone)]
pub struct PgChangeLogRepository {
    pool: PgPool,
}

impl PgChangeLogRepository {
    /// Create a new PgChangeLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChangeLogRepository for PgChangeLogRepository {
    #[instrument(skip(self))]
    async fn find_by_task(
        &self,
        task_id: Snowflake,
        limit: i64,
        before: Option<Snowflake>,
    ) -> RepoResult<Vec<TaskChangeLog>> {
        let limit = limit.clamp(1, 1000);

        let results = match before {
            Some(before_id) => {
                sqlx::query_as::<_, ChangeLogModel>(
                    r"
                    SELECT id, task_id, organization_id, field_name, old_value,
                           new_value, changed_by, created_at
                    FROM task_change_logs
                    WHERE task_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    ",
                )
                .bind(task_id.into_inner())
                .bind(before_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ChangeLogModel>(
                    r"
                    SELECT id, task_id, organization_id, field_name, old_value,
                           new_value, changed_by, created_at
                    FROM task_change_logs
                    WHERE task_id = $1
                    ORDER BY id DESC
                    LIMIT $2
                    ",
                )
                .bind(task_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TaskChangeLog::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgChangeLogRepository>();
    }
}
