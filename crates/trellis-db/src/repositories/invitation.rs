//! PostgreSQL implementation of InvitationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use trellis_core::entities::{Invitation, OrgMember};
use trellis_core::traits::{InvitationRepository, RepoResult};
use trellis_core::value_objects::Snowflake;
use trellis_core::DomainError;

use crate::models::InvitationModel;

use super::error::{invitation_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of InvitationRepository
#[derive(Clone)]
pub struct PgInvitationRepository {
    pool: PgPool,
}

impl PgInvitationRepository {
    /// Create a new PgInvitationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PgInvitationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, organization_id, email, role, inviter_id, expires_at, created_at
            FROM invitations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invitation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_organization(
        &self,
        organization_id: Snowflake,
    ) -> RepoResult<Vec<Invitation>> {
        let results = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, organization_id, email, role, inviter_id, expires_at, created_at
            FROM invitations
            WHERE organization_id = $1 AND expires_at > NOW()
            ORDER BY created_at DESC
            ",
        )
        .bind(organization_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Invitation::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_pending(
        &self,
        organization_id: Snowflake,
        email: &str,
    ) -> RepoResult<Option<Invitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, organization_id, email, role, inviter_id, expires_at, created_at
            FROM invitations
            WHERE organization_id = $1 AND LOWER(email) = LOWER($2) AND expires_at > NOW()
            ",
        )
        .bind(organization_id.into_inner())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invitation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Vec<Invitation>> {
        let results = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, organization_id, email, role, inviter_id, expires_at, created_at
            FROM invitations
            WHERE LOWER(email) = LOWER($1) AND expires_at > NOW()
            ORDER BY created_at DESC
            ",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Invitation::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, invitation: &Invitation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO invitations (id, organization_id, email, role, inviter_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(invitation.id.into_inner())
        .bind(invitation.organization_id.into_inner())
        .bind(&invitation.email)
        .bind(invitation.role.as_str())
        .bind(invitation.inviter_id.into_inner())
        .bind(invitation.expires_at)
        .bind(invitation.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::InvitationAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM invitations WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(invitation_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn accept(&self, invitation_id: Snowflake, member: &OrgMember) -> RepoResult<()> {
        // Member insert and invitation delete must land together: a crash
        // between the two would either eat the invitation or allow double use.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

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
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        let deleted = sqlx::query(
            r"
            DELETE FROM invitations WHERE id = $1
            ",
        )
        .bind(invitation_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if deleted.rows_affected() == 0 {
            return Err(invitation_not_found(invitation_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, organization_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM invitations
            WHERE organization_id = $1 AND expires_at <= NOW()
            ",
        )
        .bind(organization_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgInvitationRepository>();
    }
}
