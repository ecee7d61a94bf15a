//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    FieldChange, Invitation, MemberRole, Milestone, OrgMember, Organization, Project, Task,
    TaskChangeLog, TaskStatus, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Organization Repository
// ============================================================================

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Find organization by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Organization>>;

    /// Find organization by slug
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Organization>>;

    /// List all organizations a user belongs to
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Organization>>;

    /// Check if a slug is already taken
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool>;

    /// Create a new organization
    async fn create(&self, organization: &Organization) -> RepoResult<()>;

    /// Update an existing organization
    async fn update(&self, organization: &Organization) -> RepoResult<()>;

    /// Delete an organization (cascades to projects, tasks, milestones,
    /// members, and invitations via foreign keys)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get member count for an organization
    async fn member_count(&self, organization_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by organization and user ID
    async fn find(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<OrgMember>>;

    /// List members in an organization, keyed by user_id for paging
    async fn find_by_organization(
        &self,
        organization_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<OrgMember>>;

    /// Check if user is a member of the organization
    async fn is_member(&self, organization_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Add member to organization
    async fn create(&self, member: &OrgMember) -> RepoResult<()>;

    /// Update a member's role
    async fn update_role(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
        role: MemberRole,
    ) -> RepoResult<()>;

    /// Remove member from organization
    async fn delete(&self, organization_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Atomically swap ownership: previous owner becomes admin, target
    /// becomes owner. Runs in a single transaction.
    async fn transfer_ownership(
        &self,
        organization_id: Snowflake,
        from_user: Snowflake,
        to_user: Snowflake,
    ) -> RepoResult<()>;
}

// ============================================================================
// Invitation Repository
// ============================================================================

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Find invitation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invitation>>;

    /// List pending invitations for an organization
    async fn find_by_organization(&self, organization_id: Snowflake)
        -> RepoResult<Vec<Invitation>>;

    /// Find a pending invitation for an email within an organization
    async fn find_pending(
        &self,
        organization_id: Snowflake,
        email: &str,
    ) -> RepoResult<Option<Invitation>>;

    /// List pending invitations addressed to an email (across organizations)
    async fn find_by_email(&self, email: &str) -> RepoResult<Vec<Invitation>>;

    /// Create a new invitation
    async fn create(&self, invitation: &Invitation) -> RepoResult<()>;

    /// Delete an invitation
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Consume an invitation: create the member row and delete the
    /// invitation in a single transaction.
    async fn accept(&self, invitation_id: Snowflake, member: &OrgMember) -> RepoResult<()>;

    /// Delete expired invitations for an organization
    async fn delete_expired(&self, organization_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Project Repository
// ============================================================================

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find project by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Project>>;

    /// List projects in an organization
    async fn find_by_organization(
        &self,
        organization_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<Project>>;

    /// Create a new project
    async fn create(&self, project: &Project) -> RepoResult<()>;

    /// Update an existing project
    async fn update(&self, project: &Project) -> RepoResult<()>;

    /// Delete a project (cascades to tasks and milestones)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Task Repository
// ============================================================================

/// Filter and pagination options for task queries
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<Snowflake>,
    pub due_before: Option<DateTime<Utc>>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

/// One row of a batch reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPositionUpdate {
    pub task_id: Snowflake,
    pub status: TaskStatus,
    pub position: i32,
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find task by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Task>>;

    /// List tasks in a project with filters
    async fn find_by_project(&self, project_id: Snowflake, query: TaskQuery)
        -> RepoResult<Vec<Task>>;

    /// Highest position in a (project, status) column
    async fn max_position(
        &self,
        project_id: Snowflake,
        status: TaskStatus,
    ) -> RepoResult<Option<i32>>;

    /// Create a new task
    async fn create(&self, task: &Task) -> RepoResult<()>;

    /// Update a task and append its audit rows in one transaction.
    ///
    /// A failed audit insert must not fail the update; implementations log
    /// and continue.
    async fn update_with_log(
        &self,
        task: &Task,
        changes: &[FieldChange],
        changed_by: Snowflake,
        log_ids: &[Snowflake],
    ) -> RepoResult<()>;

    /// Apply a batch of position/status updates in a single transaction
    async fn update_positions(
        &self,
        project_id: Snowflake,
        updates: &[TaskPositionUpdate],
    ) -> RepoResult<()>;

    /// Delete a task (cascades to change log and milestone links)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Change Log Repository
// ============================================================================

#[async_trait]
pub trait ChangeLogRepository: Send + Sync {
    /// List change log rows for a task, newest first
    async fn find_by_task(
        &self,
        task_id: Snowflake,
        limit: i64,
        before: Option<Snowflake>,
    ) -> RepoResult<Vec<TaskChangeLog>>;
}

// ============================================================================
// Milestone Repository
// ============================================================================

#[async_trait]
pub trait MilestoneRepository: Send + Sync {
    /// Find milestone by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Milestone>>;

    /// List milestones in a project
    async fn find_by_project(&self, project_id: Snowflake) -> RepoResult<Vec<Milestone>>;

    /// Create a new milestone
    async fn create(&self, milestone: &Milestone) -> RepoResult<()>;

    /// Update an existing milestone
    async fn update(&self, milestone: &Milestone) -> RepoResult<()>;

    /// Delete a milestone (cascades to its task links)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Attach a task to a milestone
    async fn attach_task(&self, milestone_id: Snowflake, task_id: Snowflake) -> RepoResult<()>;

    /// Detach a task from a milestone
    async fn detach_task(&self, milestone_id: Snowflake, task_id: Snowflake) -> RepoResult<()>;

    /// List tasks attached to a milestone
    async fn find_tasks(&self, milestone_id: Snowflake) -> RepoResult<Vec<Task>>;

    /// Count attached tasks: (total, done)
    async fn task_counts(&self, milestone_id: Snowflake) -> RepoResult<(i64, i64)>;
}
