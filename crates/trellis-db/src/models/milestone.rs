//! Milestone database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for milestones table
#[derive(Debug, Clone, FromRow)]
pub struct MilestoneModel {
    pub id: i64,
    pub project_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    /// Status stored as text: 'PLANNED' | 'IN_PROGRESS' | 'COMPLETED' | 'ON_HOLD'
    pub status: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for milestone_tasks join table
#[derive(Debug, Clone, FromRow)]
pub struct MilestoneTaskModel {
    pub milestone_id: i64,
    pub task_id: i64,
    pub created_at: DateTime<Utc>,
}
