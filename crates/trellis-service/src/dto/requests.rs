//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying user input also
//! implement `Validate` for schema validation at the extractor boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use trellis_core::entities::{MemberRole, MilestoneStatus, TaskStatus};
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
    /// Revoke every session, not just this one
    #[serde(default)]
    pub all_sessions: bool,
}

/// Set the caller's active organization
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetActiveOrganizationRequest {
    /// Organization ID (Snowflake as string)
    #[validate(length(min = 1, message = "organization_id is required"))]
    pub organization_id: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: Option<String>,

    /// Avatar hash
    pub avatar: Option<String>,
}

// ============================================================================
// Organization Requests
// ============================================================================

/// Create organization request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 100, message = "Organization name must be 1-100 characters"))]
    pub name: String,

    /// Explicit slug; derived from the name when omitted
    #[validate(length(min = 2, max = 48, message = "Slug must be 2-48 characters"))]
    pub slug: Option<String>,

    /// Logo hash
    pub logo: Option<String>,

    /// Free-form metadata object
    pub metadata: Option<JsonValue>,
}

/// Update organization request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    #[validate(length(min = 1, max = 100, message = "Organization name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 48, message = "Slug must be 2-48 characters"))]
    pub slug: Option<String>,

    /// Logo hash
    pub logo: Option<String>,

    /// Free-form metadata object (replaces the stored object)
    pub metadata: Option<JsonValue>,
}

/// Transfer organization ownership request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransferOwnershipRequest {
    /// New owner's user ID (Snowflake as string)
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Update a member's role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRoleRequest {
    pub role: MemberRole,
}

// ============================================================================
// Invitation Requests
// ============================================================================

/// Create invitation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Role granted on acceptance; owner is never invitable
    pub role: MemberRole,
}

// ============================================================================
// Project Requests
// ============================================================================

/// Create project request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub name: String,

    /// Image hash
    pub image: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Update project request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub name: Option<String>,

    /// Image hash
    pub image: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

// ============================================================================
// Task Requests
// ============================================================================

/// Create task request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Task name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    /// Board column; defaults to BACKLOG
    pub status: Option<TaskStatus>,

    /// Assignee user ID (Snowflake as string); must be an organization member
    pub assignee_id: Option<String>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Update task request
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Task name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    /// Assignee user ID (Snowflake as string)
    pub assignee_id: Option<String>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Move a task to a column position (kanban drag target)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MoveTaskRequest {
    pub status: TaskStatus,

    /// 0-based destination index within the column; the derived position
    /// is capped server-side
    pub index: usize,
}

/// One entry of a batch reorder
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskPositionEntry {
    /// Task ID (Snowflake as string)
    pub task_id: String,
    pub status: TaskStatus,
    pub position: i32,
}

/// Batch reorder request: the tasks whose position or status changed
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderTasksRequest {
    #[validate(length(min = 1, max = 500, message = "Reorder batch must be 1-500 tasks"))]
    pub tasks: Vec<TaskPositionEntry>,
}

// ============================================================================
// Milestone Requests
// ============================================================================

/// Create milestone request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMilestoneRequest {
    #[validate(length(min = 1, max = 200, message = "Milestone name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub target_date: Option<DateTime<Utc>>,

    /// Defaults to PLANNED
    pub status: Option<MilestoneStatus>,
}

/// Update milestone request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMilestoneRequest {
    #[validate(length(min = 1, max = 200, message = "Milestone name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub target_date: Option<DateTime<Utc>>,

    pub status: Option<MilestoneStatus>,
}
