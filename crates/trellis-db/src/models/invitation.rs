//! Invitation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for invitations table
#[derive(Debug, Clone, FromRow)]
pub struct InvitationModel {
    pub id: i64,
    pub organization_id: i64,
    pub email: String,
    /// Role stored as text: 'admin' | 'member' (owner is never invited)
    pub role: String,
    pub inviter_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl InvitationModel {
    /// Check if the invitation is past its expiry
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
