//! Task database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tasks table
#[derive(Debug, Clone, FromRow)]
pub struct TaskModel {
    pub id: i64,
    pub project_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub assignee_id: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
    /// Status stored as text: 'BACKLOG' | 'TODO' | 'IN_PROGRESS' | 'IN_REVIEW' | 'DONE'
    pub status: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
