//! Member entity - a user's role-scoped membership within one organization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Permissions, Snowflake};

/// Role of a member within an organization
///
/// Ordered: `Member < Admin < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Admin,
    Owner,
}

impl MemberRole {
    /// Database / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Parse from the database / wire representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "member" => Some(Self::Member),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// Permissions granted by this role
    pub fn permissions(&self) -> Permissions {
        match self {
            Self::Member => Permissions::MEMBER,
            Self::Admin => Permissions::ADMIN,
            Self::Owner => Permissions::OWNER,
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organization member entity (junction between User and Organization)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgMember {
    pub organization_id: Snowflake,
    pub user_id: Snowflake,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrgMember {
    /// Create a new OrgMember
    pub fn new(organization_id: Snowflake, user_id: Snowflake, role: MemberRole) -> Self {
        let now = Utc::now();
        Self {
            organization_id,
            user_id,
            role,
            joined_at: now,
            updated_at: now,
        }
    }

    /// Check if this member is the organization owner
    #[inline]
    pub fn is_owner(&self) -> bool {
        self.role == MemberRole::Owner
    }

    /// Permissions this member holds in the organization
    #[inline]
    pub fn permissions(&self) -> Permissions {
        self.role.permissions()
    }

    /// Change the member's role
    pub fn set_role(&mut self, role: MemberRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(MemberRole::Member < MemberRole::Admin);
        assert!(MemberRole::Admin < MemberRole::Owner);
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [MemberRole::Member, MemberRole::Admin, MemberRole::Owner] {
            assert_eq!(MemberRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(MemberRole::parse("superuser"), None);
    }

    #[test]
    fn test_member_permissions() {
        let member = OrgMember::new(Snowflake::new(1), Snowflake::new(2), MemberRole::Member);
        assert!(member.permissions().has(Permissions::MANAGE_TASKS));
        assert!(!member.permissions().has(Permissions::MANAGE_MEMBERS));
        assert!(!member.is_owner());
    }

    #[test]
    fn test_set_role() {
        let mut member = OrgMember::new(Snowflake::new(1), Snowflake::new(2), MemberRole::Member);
        member.set_role(MemberRole::Owner);
        assert!(member.is_owner());
        assert!(member.permissions().has(Permissions::DELETE_ORGANIZATION));
    }
}
