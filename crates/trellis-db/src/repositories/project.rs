//! PostgreSQL implementation of ProjectRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use trellis_core::entities::Project;
use trellis_core::traits::{ProjectRepository, RepoResult};
use trellis_core::value_objects::Snowflake;

use crate::models::ProjectModel;

use super::error::{map_db_error, project_not_found};

/// PostgreSQL implementation of ProjectRepository
#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    /// Create a new PgProjectRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Project>> {
        let result = sqlx::query_as::<_, ProjectModel>(
            r"
            SELECT id, organization_id, name, image, description, created_at, updated_at
            FROM projects
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Project::from))
    }

    #[instrument(skip(self))]
    async fn find_by_organization(
        &self,
        organization_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<Project>> {
        let limit = limit.clamp(1, 1000);

        let results = match after {
            Some(after_id) => {
                sqlx::query_as::<_, ProjectModel>(
                    r"
                    SELECT id, organization_id, name, image, description, created_at, updated_at
                    FROM projects
                    WHERE organization_id = $1 AND id > $2
                    ORDER BY id
                    LIMIT $3
                    ",
                )
                .bind(organization_id.into_inner())
                .bind(after_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ProjectModel>(
                    r"
                    SELECT id, organization_id, name, image, description, created_at, updated_at
                    FROM projects
                    WHERE organization_id = $1
                    ORDER BY id
                    LIMIT $2
                    ",
                )
                .bind(organization_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Project::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, project: &Project) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO projects (id, organization_id, name, image, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(project.id.into_inner())
        .bind(project.organization_id.into_inner())
        .bind(&project.name)
        .bind(&project.image)
        .bind(&project.description)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, project: &Project) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE projects
            SET name = $2, image = $3, description = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(project.id.into_inner())
        .bind(&project.name)
        .bind(&project.image)
        .bind(&project.description)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(project_not_found(project.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Cascades to tasks and milestones via foreign keys
        let result = sqlx::query(
            r"
            DELETE FROM projects WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(project_not_found(id));
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
        assert_send_sync::<PgProjectRepository>();
    }
}
