//! PostgreSQL implementation of OrganizationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use trellis_core::entities::Organization;
use trellis_core::traits::{OrganizationRepository, RepoResult};
use trellis_core::value_objects::Snowflake;
use trellis_core::DomainError;

use crate::models::OrganizationModel;

use super::error::{map_db_error, map_unique_violation, organization_not_found};

/// PostgreSQL implementation of OrganizationRepository
#[derive(Clone)]
pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    /// Create a new PgOrganizationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Organization>> {
        let result = sqlx::query_as::<_, OrganizationModel>(
            r"
            SELECT id, name, slug, logo, metadata, created_at, updated_at
            FROM organizations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Organization::from))
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Organization>> {
        let result = sqlx::query_as::<_, OrganizationModel>(
            r"
            SELECT id, name, slug, logo, metadata, created_at, updated_at
            FROM organizations
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Organization::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Organization>> {
        let results = sqlx::query_as::<_, OrganizationModel>(
            r"
            SELECT o.id, o.name, o.slug, o.logo, o.metadata, o.created_at, o.updated_at
            FROM organizations o
            JOIN organization_members m ON m.organization_id = o.id
            WHERE m.user_id = $1
            ORDER BY m.joined_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Organization::from).collect())
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM organizations WHERE slug = $1)
            ",
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn create(&self, organization: &Organization) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO organizations (id, name, slug, logo, metadata, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(organization.id.into_inner())
        .bind(&organization.name)
        .bind(&organization.slug)
        .bind(&organization.logo)
        .bind(&organization.metadata)
        .bind(organization.created_at)
        .bind(organization.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, organization: &Organization) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE organizations
            SET name = $2, slug = $3, logo = $4, metadata = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(organization.id.into_inner())
        .bind(&organization.name)
        .bind(&organization.slug)
        .bind(&organization.logo)
        .bind(&organization.metadata)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken))?;

        if result.rows_affected() == 0 {
            return Err(organization_not_found(organization.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Hard delete; the schema cascades to members, invitations,
        // projects, tasks, milestones, and change logs.
        let result = sqlx::query(
            r"
            DELETE FROM organizations WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(organization_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, organization_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM organization_members WHERE organization_id = $1
            ",
        )
        .bind(organization_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgOrganizationRepository>();
    }
}
