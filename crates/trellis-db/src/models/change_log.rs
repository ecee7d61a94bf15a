//! Task change log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for task_change_logs table
///
/// Append-only: the repository exposes no update or delete for these rows.
#[derive(Debug, Clone, FromRow)]
pub struct ChangeLogModel {
    pub id: i64,
    pub task_id: i64,
    pub organization_id: i64,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: i64,
    pub created_at: DateTime<Utc>,
}
