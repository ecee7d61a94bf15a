//! Organization database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for organizations table
#[derive(Debug, Clone, FromRow)]
pub struct OrganizationModel {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
    /// Free-form JSONB column
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
