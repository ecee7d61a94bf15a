//! Path parameter extractors
//!
//! Type-safe parsing of Snowflake IDs from path parameters.

use trellis_core::Snowflake;

use crate::response::ApiError;

fn parse_id(raw: &str, what: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {what} format")))
}

/// Path parameters with organization_id
#[derive(Debug, serde::Deserialize)]
pub struct OrganizationIdPath {
    pub organization_id: String,
}

impl OrganizationIdPath {
    /// Parse organization_id as Snowflake
    pub fn organization_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.organization_id, "organization_id")
    }
}

/// Path parameters with organization_id and user_id (member routes)
#[derive(Debug, serde::Deserialize)]
pub struct MemberPath {
    pub organization_id: String,
    pub user_id: String,
}

impl MemberPath {
    /// Parse organization_id as Snowflake
    pub fn organization_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.organization_id, "organization_id")
    }

    /// Parse user_id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// Path parameters with user_id
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// Path parameters with invitation_id
#[derive(Debug, serde::Deserialize)]
pub struct InvitationIdPath {
    pub invitation_id: String,
}

impl InvitationIdPath {
    /// Parse invitation_id as Snowflake
    pub fn invitation_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.invitation_id, "invitation_id")
    }
}

/// Path parameters with organization_id and invitation_id
#[derive(Debug, serde::Deserialize)]
pub struct OrganizationInvitationPath {
    pub organization_id: String,
    pub invitation_id: String,
}

impl OrganizationInvitationPath {
    /// Parse organization_id as Snowflake
    pub fn organization_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.organization_id, "organization_id")
    }

    /// Parse invitation_id as Snowflake
    pub fn invitation_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.invitation_id, "invitation_id")
    }
}

/// Path parameters with project_id
#[derive(Debug, serde::Deserialize)]
pub struct ProjectIdPath {
    pub project_id: String,
}

impl ProjectIdPath {
    /// Parse project_id as Snowflake
    pub fn project_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.project_id, "project_id")
    }
}

/// Path parameters with task_id
#[derive(Debug, serde::Deserialize)]
pub struct TaskIdPath {
    pub task_id: String,
}

impl TaskIdPath {
    /// Parse task_id as Snowflake
    pub fn task_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.task_id, "task_id")
    }
}

/// Path parameters with milestone_id
#[derive(Debug, serde::Deserialize)]
pub struct MilestoneIdPath {
    pub milestone_id: String,
}

impl MilestoneIdPath {
    /// Parse milestone_id as Snowflake
    pub fn milestone_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.milestone_id, "milestone_id")
    }
}

/// Path parameters with milestone_id and task_id
#[derive(Debug, serde::Deserialize)]
pub struct MilestoneTaskPath {
    pub milestone_id: String,
    pub task_id: String,
}

impl MilestoneTaskPath {
    /// Parse milestone_id as Snowflake
    pub fn milestone_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.milestone_id, "milestone_id")
    }

    /// Parse task_id as Snowflake
    pub fn task_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.task_id, "task_id")
    }
}
