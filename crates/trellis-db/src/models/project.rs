//! Project database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for projects table
#[derive(Debug, Clone, FromRow)]
pub struct ProjectModel {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
