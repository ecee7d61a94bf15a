//! Permission bitflags for organization-scoped access control
//!
//! Permissions are derived from a member's role; they are never stored
//! per-member. Stored nowhere, computed everywhere.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Organization permission flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Read organization, projects, tasks, milestones, and members
        const VIEW_ORGANIZATION   = 1 << 0;
        /// Create, edit, move, reorder, and delete tasks
        const MANAGE_TASKS        = 1 << 1;
        /// Create, edit, and delete milestones; attach/detach tasks
        const MANAGE_MILESTONES   = 1 << 2;
        /// Create, edit, and delete projects
        const MANAGE_PROJECTS     = 1 << 3;
        /// Change member roles and remove members
        const MANAGE_MEMBERS      = 1 << 4;
        /// Create and cancel invitations
        const MANAGE_INVITATIONS  = 1 << 5;
        /// Edit organization settings (name, slug, logo, metadata)
        const MANAGE_ORGANIZATION = 1 << 6;
        /// Delete the organization entirely
        const DELETE_ORGANIZATION = 1 << 7;
        /// Hand the organization to another member
        const TRANSFER_OWNERSHIP  = 1 << 8;

        /// Permissions granted to the `member` role
        const MEMBER = Self::VIEW_ORGANIZATION.bits()
            | Self::MANAGE_TASKS.bits()
            | Self::MANAGE_MILESTONES.bits();

        /// Permissions granted to the `admin` role
        const ADMIN = Self::MEMBER.bits()
            | Self::MANAGE_PROJECTS.bits()
            | Self::MANAGE_MEMBERS.bits()
            | Self::MANAGE_INVITATIONS.bits()
            | Self::MANAGE_ORGANIZATION.bits();

        /// Permissions granted to the `owner` role
        const OWNER = Self::ADMIN.bits()
            | Self::DELETE_ORGANIZATION.bits()
            | Self::TRANSFER_OWNERSHIP.bits();
    }
}

impl Permissions {
    /// Check if the permission set contains a required permission
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        self.contains(permission)
    }

    /// Check if the permission set has any of the given permissions
    #[inline]
    pub fn has_any(&self, permissions: Permissions) -> bool {
        self.intersects(permissions)
    }

    /// Get a list of all individual permissions that are set
    pub fn list(&self) -> Vec<&'static str> {
        const NAMES: &[(Permissions, &str)] = &[
            (Permissions::VIEW_ORGANIZATION, "VIEW_ORGANIZATION"),
            (Permissions::MANAGE_TASKS, "MANAGE_TASKS"),
            (Permissions::MANAGE_MILESTONES, "MANAGE_MILESTONES"),
            (Permissions::MANAGE_PROJECTS, "MANAGE_PROJECTS"),
            (Permissions::MANAGE_MEMBERS, "MANAGE_MEMBERS"),
            (Permissions::MANAGE_INVITATIONS, "MANAGE_INVITATIONS"),
            (Permissions::MANAGE_ORGANIZATION, "MANAGE_ORGANIZATION"),
            (Permissions::DELETE_ORGANIZATION, "DELETE_ORGANIZATION"),
            (Permissions::TRANSFER_OWNERSHIP, "TRANSFER_OWNERSHIP"),
        ];

        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets_are_nested() {
        assert!(Permissions::ADMIN.contains(Permissions::MEMBER));
        assert!(Permissions::OWNER.contains(Permissions::ADMIN));
    }

    #[test]
    fn test_member_cannot_manage_org() {
        let perms = Permissions::MEMBER;
        assert!(perms.has(Permissions::MANAGE_TASKS));
        assert!(!perms.has(Permissions::MANAGE_ORGANIZATION));
        assert!(!perms.has(Permissions::MANAGE_MEMBERS));
    }

    #[test]
    fn test_only_owner_deletes() {
        assert!(!Permissions::ADMIN.has(Permissions::DELETE_ORGANIZATION));
        assert!(Permissions::OWNER.has(Permissions::DELETE_ORGANIZATION));
        assert!(Permissions::OWNER.has(Permissions::TRANSFER_OWNERSHIP));
    }

    #[test]
    fn test_list_names() {
        let perms = Permissions::VIEW_ORGANIZATION | Permissions::MANAGE_TASKS;
        assert_eq!(perms.list(), vec!["VIEW_ORGANIZATION", "MANAGE_TASKS"]);
    }
}
