//! Organization member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for organization_members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub organization_id: i64,
    pub user_id: i64,
    /// Role stored as text: 'owner' | 'admin' | 'member'
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
