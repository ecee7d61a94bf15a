//! Member service
//!
//! Handles organization member management: listing, role changes, removal,
//! and leaving.

use tracing::{info, instrument};
use trellis_core::entities::MemberRole;
use trellis_core::{DomainError, Permissions, Snowflake};

use crate::dto::mappers::MemberWithUser;
use crate::dto::responses::MemberResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List members of an organization (members only)
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> ServiceResult<Vec<MemberResponse>> {
        PermissionService::new(self.ctx)
            .require_member(organization_id, user_id)
            .await?;

        let members = self
            .ctx
            .member_repo()
            .find_by_organization(organization_id, limit, after)
            .await?;

        let mut responses = Vec::with_capacity(members.len());
        for member in members {
            let user = self
                .ctx
                .user_repo()
                .find_by_id(member.user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", member.user_id.to_string()))?;
            responses.push(MemberResponse::from(MemberWithUser { member, user }));
        }

        Ok(responses)
    }

    /// Get a single member
    #[instrument(skip(self))]
    pub async fn get_member(
        &self,
        organization_id: Snowflake,
        target_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<MemberResponse> {
        PermissionService::new(self.ctx)
            .require_member(organization_id, actor_id)
            .await?;

        let member = self
            .ctx
            .member_repo()
            .find(organization_id, target_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Member", format!("{organization_id}/{target_id}"))
            })?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        Ok(MemberResponse::from(MemberWithUser { member, user }))
    }

    /// Change a member's role
    #[instrument(skip(self))]
    pub async fn update_member_role(
        &self,
        organization_id: Snowflake,
        target_id: Snowflake,
        actor_id: Snowflake,
        new_role: MemberRole,
    ) -> ServiceResult<MemberResponse> {
        let permission_service = PermissionService::new(self.ctx);
        let actor = permission_service
            .require_permission(organization_id, actor_id, Permissions::MANAGE_MEMBERS)
            .await?;

        if new_role == MemberRole::Owner {
            return Err(ServiceError::validation(
                "Ownership is granted through transfer-ownership, not role updates",
            ));
        }

        let mut target = self
            .ctx
            .member_repo()
            .find(organization_id, target_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Member", format!("{organization_id}/{target_id}"))
            })?;

        if !PermissionService::can_manage_member(&actor, &target) {
            if target.role == MemberRole::Owner {
                return Err(ServiceError::from(DomainError::CannotModifyOwner));
            }
            return Err(ServiceError::permission_denied("Cannot manage this member"));
        }

        if target.role != new_role {
            self.ctx
                .member_repo()
                .update_role(organization_id, target_id, new_role)
                .await?;
            target.set_role(new_role);
            info!(
                organization_id = %organization_id,
                target_id = %target_id,
                role = %new_role,
                "Member role updated"
            );
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        Ok(MemberResponse::from(MemberWithUser {
            member: target,
            user,
        }))
    }

    /// Remove a member from the organization
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        organization_id: Snowflake,
        target_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        let permission_service = PermissionService::new(self.ctx);
        let actor = permission_service
            .require_permission(organization_id, actor_id, Permissions::MANAGE_MEMBERS)
            .await?;

        let target = self
            .ctx
            .member_repo()
            .find(organization_id, target_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Member", format!("{organization_id}/{target_id}"))
            })?;

        if target.role == MemberRole::Owner {
            return Err(ServiceError::from(DomainError::CannotRemoveOwner));
        }

        if !PermissionService::can_manage_member(&actor, &target) {
            return Err(ServiceError::permission_denied("Cannot manage this member"));
        }

        self.ctx
            .member_repo()
            .delete(organization_id, target_id)
            .await?;

        self.clear_active_org_if_current(target_id, organization_id)
            .await;

        info!(
            organization_id = %organization_id,
            target_id = %target_id,
            "Member removed"
        );

        Ok(())
    }

    /// Leave an organization (owners must transfer ownership first)
    #[instrument(skip(self))]
    pub async fn leave_organization(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let member = PermissionService::new(self.ctx)
            .require_member(organization_id, user_id)
            .await?;

        if member.is_owner() {
            return Err(ServiceError::from(
                DomainError::CannotLeaveOwnedOrganization,
            ));
        }

        self.ctx
            .member_repo()
            .delete(organization_id, user_id)
            .await?;

        self.clear_active_org_if_current(user_id, organization_id)
            .await;

        info!(organization_id = %organization_id, user_id = %user_id, "Member left organization");

        Ok(())
    }

    /// Drop the user's active-organization pointer if it targets this org
    async fn clear_active_org_if_current(&self, user_id: Snowflake, organization_id: Snowflake) {
        match self.ctx.active_org_store().get(user_id).await {
            Ok(Some(active)) if active == organization_id => {
                if let Err(e) = self.ctx.active_org_store().clear(user_id).await {
                    tracing::warn!(error = %e, "Failed to clear active organization");
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read active organization"),
        }
    }
}

#[cfg(test)]
mod tests {
    // Role-change rules are unit tested in permission::tests; the flows
    // here are covered by tests/integration.
}
