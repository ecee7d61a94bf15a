//! Test fixtures and data generators
//!
//! Provides reusable request/response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub created_at: String,
}

// ============================================================================
// Organizations
// ============================================================================

/// Create organization request
#[derive(Debug, Serialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl CreateOrganizationRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Org {suffix}"),
            slug: Some(format!("test-org-{suffix}")),
            logo: None,
        }
    }
}

/// Organization response
#[derive(Debug, Deserialize)]
pub struct OrganizationResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
}

/// Invitation request
#[derive(Debug, Serialize)]
pub struct CreateInvitationRequest {
    pub email: String,
    pub role: String,
}

/// Invitation response
#[derive(Debug, Deserialize)]
pub struct InvitationResponse {
    pub id: String,
    pub organization_id: String,
    pub email: String,
    pub role: String,
}

/// Member response
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub organization_id: String,
    pub role: String,
    pub user: UserResponse,
}

// ============================================================================
// Projects / Tasks / Milestones
// ============================================================================

/// Create project request
#[derive(Debug, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateProjectRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Project {}", unique_suffix()),
            description: None,
        }
    }
}

/// Project response
#[derive(Debug, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub organization_id: String,
    pub name: String,
}

/// Create task request
#[derive(Debug, Serialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateTaskRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Task {}", unique_suffix()),
            status: None,
            description: None,
        }
    }

    pub fn with_status(status: &str) -> Self {
        Self {
            name: format!("Task {}", unique_suffix()),
            status: Some(status.to_string()),
            description: None,
        }
    }
}

/// Task response
#[derive(Debug, Deserialize)]
pub struct TaskResponse {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub status: String,
    pub position: i32,
}

/// Change log entry response
#[derive(Debug, Deserialize)]
pub struct ChangeLogResponse {
    pub id: String,
    pub task_id: String,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
}

/// Create milestone request
#[derive(Debug, Serialize)]
pub struct CreateMilestoneRequest {
    pub name: String,
}

impl CreateMilestoneRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Milestone {}", unique_suffix()),
        }
    }
}

/// Milestone response
#[derive(Debug, Deserialize)]
pub struct MilestoneResponse {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub status: String,
}

/// Milestone response with task counts
#[derive(Debug, Deserialize)]
pub struct MilestoneWithCountsResponse {
    pub id: String,
    pub status: String,
    pub task_count: i64,
    pub done_count: i64,
}
