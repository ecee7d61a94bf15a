//! Permission service
//!
//! Role-based access control for organization members. Permissions are
//! derived from the member's role; there is no per-member grant storage.

use tracing::{debug, instrument};
use trellis_core::entities::{MemberRole, OrgMember};
use trellis_core::{Permissions, Snowflake};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a user's membership in an organization, if any
    #[instrument(skip(self))]
    pub async fn find_member(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Option<OrgMember>> {
        self.ctx
            .member_repo()
            .find(organization_id, user_id)
            .await
            .map_err(ServiceError::from)
    }

    /// Require that the user is a member of the organization.
    ///
    /// Non-members get NOT_FOUND rather than FORBIDDEN so organization IDs
    /// cannot be probed from outside the tenant.
    #[instrument(skip(self))]
    pub async fn require_member(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<OrgMember> {
        self.find_member(organization_id, user_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Organization", organization_id.to_string())
            })
    }

    /// Require that the user holds a permission in the organization
    #[instrument(skip(self))]
    pub async fn require_permission(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
        permission: Permissions,
    ) -> ServiceResult<OrgMember> {
        let member = self.require_member(organization_id, user_id).await?;

        let held = member.permissions();
        if !held.has(permission) {
            let perm_names = permission.list().join(", ");
            debug!(
                user_id = %user_id,
                organization_id = %organization_id,
                role = %member.role,
                missing = %perm_names,
                "Permission denied"
            );
            return Err(ServiceError::permission_denied(perm_names));
        }

        Ok(member)
    }

    /// Check whether the user is a member at all
    #[instrument(skip(self))]
    pub async fn is_member(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<bool> {
        self.ctx
            .member_repo()
            .is_member(organization_id, user_id)
            .await
            .map_err(ServiceError::from)
    }

    /// Check if actor can modify target's membership (role change, removal).
    ///
    /// Rules:
    /// 1. Nobody modifies their own membership through member management
    /// 2. The owner can modify anyone else
    /// 3. The owner's membership is untouchable (transfer ownership instead)
    /// 4. Otherwise the actor must outrank the target
    pub fn can_manage_member(actor: &OrgMember, target: &OrgMember) -> bool {
        if actor.user_id == target.user_id {
            return false;
        }
        if target.role == MemberRole::Owner {
            return false;
        }
        if actor.role == MemberRole::Owner {
            return true;
        }
        actor.role > target.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(user: i64, role: MemberRole) -> OrgMember {
        OrgMember::new(Snowflake::new(1), Snowflake::new(user), role)
    }

    #[test]
    fn test_owner_manages_everyone_else() {
        let owner = member(1, MemberRole::Owner);
        let admin = member(2, MemberRole::Admin);
        let plain = member(3, MemberRole::Member);

        assert!(PermissionService::can_manage_member(&owner, &admin));
        assert!(PermissionService::can_manage_member(&owner, &plain));
    }

    #[test]
    fn test_owner_is_untouchable() {
        let owner = member(1, MemberRole::Owner);
        let admin = member(2, MemberRole::Admin);

        assert!(!PermissionService::can_manage_member(&admin, &owner));
    }

    #[test]
    fn test_admin_cannot_manage_peer_admin() {
        let admin_a = member(2, MemberRole::Admin);
        let admin_b = member(3, MemberRole::Admin);

        assert!(!PermissionService::can_manage_member(&admin_a, &admin_b));
        assert!(PermissionService::can_manage_member(
            &admin_a,
            &member(4, MemberRole::Member)
        ));
    }

    #[test]
    fn test_no_self_management() {
        let admin = member(2, MemberRole::Admin);
        assert!(!PermissionService::can_manage_member(&admin, &admin));
    }
}
