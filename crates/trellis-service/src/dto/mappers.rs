//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use trellis_core::entities::{
    Invitation, Milestone, OrgMember, Organization, Project, Task, TaskChangeLog, User,
};

use super::responses::{
    ChangeLogResponse, CurrentUserResponse, InvitationResponse, MemberResponse, MilestoneResponse,
    MilestoneWithCountsResponse, OrganizationResponse, OrganizationWithCountsResponse,
    ProjectResponse, TaskResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Organization Mappers
// ============================================================================

impl From<&Organization> for OrganizationResponse {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id.to_string(),
            name: org.name.clone(),
            slug: org.slug.clone(),
            logo: org.logo.clone(),
            metadata: org.metadata.clone(),
            created_at: org.created_at,
        }
    }
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        Self::from(&org)
    }
}

/// Organization with its member count
pub struct OrganizationWithCounts {
    pub organization: Organization,
    pub member_count: i64,
}

impl From<OrganizationWithCounts> for OrganizationWithCountsResponse {
    fn from(value: OrganizationWithCounts) -> Self {
        Self {
            organization: OrganizationResponse::from(&value.organization),
            member_count: value.member_count,
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

/// Member joined with its user row
pub struct MemberWithUser {
    pub member: OrgMember,
    pub user: User,
}

impl From<MemberWithUser> for MemberResponse {
    fn from(value: MemberWithUser) -> Self {
        Self {
            organization_id: value.member.organization_id.to_string(),
            role: value.member.role,
            joined_at: value.member.joined_at,
            user: UserResponse::from(&value.user),
        }
    }
}

// ============================================================================
// Invitation Mappers
// ============================================================================

impl From<&Invitation> for InvitationResponse {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id.to_string(),
            organization_id: invitation.organization_id.to_string(),
            email: invitation.email.clone(),
            role: invitation.role,
            inviter_id: invitation.inviter_id.to_string(),
            expires_at: invitation.expires_at,
            created_at: invitation.created_at,
        }
    }
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self::from(&invitation)
    }
}

// ============================================================================
// Project Mappers
// ============================================================================

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            organization_id: project.organization_id.to_string(),
            name: project.name.clone(),
            image: project.image.clone(),
            description: project.description.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self::from(&project)
    }
}

// ============================================================================
// Task Mappers
// ============================================================================

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            project_id: task.project_id.to_string(),
            organization_id: task.organization_id.to_string(),
            name: task.name.clone(),
            description: task.description.clone(),
            assignee_id: task.assignee_id.map(|id| id.to_string()),
            due_date: task.due_date,
            status: task.status,
            position: task.position,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

impl From<&TaskChangeLog> for ChangeLogResponse {
    fn from(entry: &TaskChangeLog) -> Self {
        Self {
            id: entry.id.to_string(),
            task_id: entry.task_id.to_string(),
            field_name: entry.field_name.clone(),
            old_value: entry.old_value.clone(),
            new_value: entry.new_value.clone(),
            changed_by: entry.changed_by.to_string(),
            created_at: entry.created_at,
        }
    }
}

impl From<TaskChangeLog> for ChangeLogResponse {
    fn from(entry: TaskChangeLog) -> Self {
        Self::from(&entry)
    }
}

// ============================================================================
// Milestone Mappers
// ============================================================================

impl From<&Milestone> for MilestoneResponse {
    fn from(milestone: &Milestone) -> Self {
        Self {
            id: milestone.id.to_string(),
            project_id: milestone.project_id.to_string(),
            organization_id: milestone.organization_id.to_string(),
            name: milestone.name.clone(),
            description: milestone.description.clone(),
            target_date: milestone.target_date,
            status: milestone.status,
            created_by: milestone.created_by.to_string(),
            created_at: milestone.created_at,
            updated_at: milestone.updated_at,
        }
    }
}

impl From<Milestone> for MilestoneResponse {
    fn from(milestone: Milestone) -> Self {
        Self::from(&milestone)
    }
}

/// Milestone with its task progress counts
pub struct MilestoneWithCounts {
    pub milestone: Milestone,
    pub task_count: i64,
    pub done_count: i64,
}

impl From<MilestoneWithCounts> for MilestoneWithCountsResponse {
    fn from(value: MilestoneWithCounts) -> Self {
        Self {
            milestone: MilestoneResponse::from(&value.milestone),
            task_count: value.task_count,
            done_count: value.done_count,
        }
    }
}
