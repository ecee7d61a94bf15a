//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use trellis_core::entities::{MemberRole, OrgMember};
use trellis_core::traits::{MemberRepository, RepoResult};
use trellis_core::value_objects::Snowflake;
use trellis_core::DomainError;

use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation, member_not_found};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<OrgMember>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT organization_id, user_id, role, joined_at, updated_at
            FROM organization_members
            WHERE organization_id = $1 AND user_id = $2
            ",
        )
        .bind(organization_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(OrgMember::from))
    }

    #[instrument(skip(self))]
    async fn find_by_organization(
        &self,
        organization_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<OrgMember>> {
        let limit = limit.clamp(1, 1000);

        let results = match after {
            Some(after_id) => {
                sqlx::query_as::<_, MemberModel>(
                    r"
                    SELECT organization_id, user_id, role, joined_at, updated_at
                    FROM organization_members
                    WHERE organization_id = $1 AND user_id > $2
                    ORDER BY user_id
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
                sqlx::query_as::<_, MemberModel>(
                    r"
                    SELECT organization_id, user_id, role, joined_at, updated_at
                    FROM organization_members
                    WHERE organization_id = $1
                    ORDER BY user_id
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

        Ok(results.into_iter().map(OrgMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn is_member(&self, organization_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM organization_members
                WHERE organization_id = $1 AND user_id = $2
            )
            ",
        )
        .bind(organization_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn create(&self, member: &OrgMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO organization_members (organization_id, user_id, role, joined_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(member.organization_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_role(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
        role: MemberRole,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE organization_members
            SET role = $3, updated_at = NOW()
            WHERE organization_id = $1 AND user_id = $2
            ",
        )
        .bind(organization_id.into_inner())
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, organization_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM organization_members
            WHERE organization_id = $1 AND user_id = $2
            ",
        )
        .bind(organization_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn transfer_ownership(
        &self,
        organization_id: Snowflake,
        from_user: Snowflake,
        to_user: Snowflake,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let demoted = sqlx::query(
            r"
            UPDATE organization_members
            SET role = 'admin', updated_at = NOW()
            WHERE organization_id = $1 AND user_id = $2 AND role = 'owner'
            ",
        )
        .bind(organization_id.into_inner())
        .bind(from_user.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if demoted.rows_affected() == 0 {
            return Err(DomainError::NotOrganizationOwner);
        }

        let promoted = sqlx::query(
            r"
            UPDATE organization_members
            SET role = 'owner', updated_at = NOW()
            WHERE organization_id = $1 AND user_id = $2
            ",
        )
        .bind(organization_id.into_inner())
        .bind(to_user.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if promoted.rows_affected() == 0 {
            return Err(member_not_found());
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMemberRepository>();
    }
}
