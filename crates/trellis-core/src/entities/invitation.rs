//! Invitation entity - a pending offer to join an organization

use chrono::{DateTime, Duration, Utc};

use crate::entities::MemberRole;
use crate::value_objects::Snowflake;

/// Default invitation lifetime
const DEFAULT_TTL_HOURS: i64 = 48;

/// Invitation entity
///
/// Single-use: consumed (deleted) on acceptance, and purged lazily once
/// expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: Snowflake,
    pub organization_id: Snowflake,
    pub email: String,
    pub role: MemberRole,
    pub inviter_id: Snowflake,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Create a new Invitation with the default 48h lifetime
    pub fn new(
        id: Snowflake,
        organization_id: Snowflake,
        email: String,
        role: MemberRole,
        inviter_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            organization_id,
            email,
            role,
            inviter_id,
            expires_at: now + Duration::hours(DEFAULT_TTL_HOURS),
            created_at: now,
        }
    }

    /// Override the expiry
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Check if the invitation has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check whether `email` is the invitee (case-insensitive)
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_invitation() -> Invitation {
        Invitation::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "dev@example.com".to_string(),
            MemberRole::Member,
            Snowflake::new(3),
        )
    }

    #[test]
    fn test_invitation_defaults() {
        let invitation = sample_invitation();
        assert!(!invitation.is_expired());
        assert_eq!(invitation.role, MemberRole::Member);
        assert!(invitation.expires_at > invitation.created_at);
    }

    #[test]
    fn test_expired_invitation() {
        let invitation =
            sample_invitation().with_expires_at(Utc::now() - Duration::minutes(1));
        assert!(invitation.is_expired());
    }

    #[test]
    fn test_email_match_is_case_insensitive() {
        let invitation = sample_invitation();
        assert!(invitation.matches_email("dev@example.com"));
        assert!(invitation.matches_email("Dev@Example.COM"));
        assert!(!invitation.matches_email("other@example.com"));
    }
}
