//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use trellis_core::entities::{MemberRole, MilestoneStatus, TaskStatus};

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(
        data: Vec<T>,
        before: Option<String>,
        after: Option<String>,
        has_more: bool,
        limit: i32,
    ) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                before,
                after,
                has_more,
                limit,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Cursor for fetching next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i32,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
    pub cache: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool, cache: bool) -> Self {
        Self {
            status: if database && cache { "ready" } else { "degraded" },
            database,
            cache,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// The caller's active organization, if one is set
#[derive(Debug, Serialize)]
pub struct ActiveOrganizationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationResponse>,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (no email)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user response (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Organization Responses
// ============================================================================

/// Organization response
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

/// Organization response with member count
#[derive(Debug, Serialize)]
pub struct OrganizationWithCountsResponse {
    #[serde(flatten)]
    pub organization: OrganizationResponse,
    pub member_count: i64,
}

// ============================================================================
// Member Responses
// ============================================================================

/// Organization member response with embedded user
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub organization_id: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    pub user: UserResponse,
}

// ============================================================================
// Invitation Responses
// ============================================================================

/// Invitation response
#[derive(Debug, Serialize)]
pub struct InvitationResponse {
    pub id: String,
    pub organization_id: String,
    pub email: String,
    pub role: MemberRole,
    pub inviter_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Project Responses
// ============================================================================

/// Project response
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Task Responses
// ============================================================================

/// Task response
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: String,
    pub project_id: String,
    pub organization_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One task change log entry
#[derive(Debug, Serialize)]
pub struct ChangeLogResponse {
    pub id: String,
    pub task_id: String,
    pub field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    pub changed_by: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Milestone Responses
// ============================================================================

/// Milestone response
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneResponse {
    pub id: String,
    pub project_id: String,
    pub organization_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    pub status: MilestoneStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Milestone response with task progress counts
#[derive(Debug, Serialize)]
pub struct MilestoneWithCountsResponse {
    #[serde(flatten)]
    pub milestone: MilestoneResponse,
    pub task_count: i64,
    pub done_count: i64,
}
