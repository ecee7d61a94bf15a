//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(Snowflake),

    #[error("Project not found: {0}")]
    ProjectNotFound(Snowflake),

    #[error("Task not found: {0}")]
    TaskNotFound(Snowflake),

    #[error("Milestone not found: {0}")]
    MilestoneNotFound(Snowflake),

    #[error("Member not found in organization")]
    MemberNotFound,

    #[error("Invitation not found: {0}")]
    InvitationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Invalid task position: {0}")]
    InvalidPosition(i32),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Not organization owner")]
    NotOrganizationOwner,

    #[error("Cannot modify the organization owner")]
    CannotModifyOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Organization slug already taken")]
    SlugTaken,

    #[error("Already a member of this organization")]
    AlreadyMember,

    #[error("A pending invitation already exists for this email")]
    InvitationAlreadyExists,

    #[error("Task already attached to this milestone")]
    TaskAlreadyAttached,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Owner cannot leave the organization (transfer ownership first)")]
    CannotLeaveOwnedOrganization,

    #[error("Cannot remove the organization owner")]
    CannotRemoveOwner,

    #[error("Invitation has expired")]
    InvitationExpired,

    #[error("Invitation is addressed to a different email")]
    InvitationEmailMismatch,

    #[error("Task and milestone belong to different projects")]
    ProjectMismatch,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::OrganizationNotFound(_) => "UNKNOWN_ORGANIZATION",
            Self::ProjectNotFound(_) => "UNKNOWN_PROJECT",
            Self::TaskNotFound(_) => "UNKNOWN_TASK",
            Self::MilestoneNotFound(_) => "UNKNOWN_MILESTONE",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::InvitationNotFound(_) => "UNKNOWN_INVITATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidSlug(_) => "INVALID_SLUG",
            Self::InvalidPosition(_) => "INVALID_POSITION",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::NotOrganizationOwner => "NOT_ORGANIZATION_OWNER",
            Self::CannotModifyOwner => "CANNOT_MODIFY_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::SlugTaken => "SLUG_TAKEN",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::InvitationAlreadyExists => "INVITATION_ALREADY_EXISTS",
            Self::TaskAlreadyAttached => "TASK_ALREADY_ATTACHED",

            // Business Rules
            Self::CannotLeaveOwnedOrganization => "CANNOT_LEAVE_OWNED_ORGANIZATION",
            Self::CannotRemoveOwner => "CANNOT_REMOVE_OWNER",
            Self::InvitationExpired => "INVITATION_EXPIRED",
            Self::InvitationEmailMismatch => "INVITATION_EMAIL_MISMATCH",
            Self::ProjectMismatch => "PROJECT_MISMATCH",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::OrganizationNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::TaskNotFound(_)
                | Self::MilestoneNotFound(_)
                | Self::MemberNotFound
                | Self::InvitationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidSlug(_)
                | Self::InvalidPosition(_)
                | Self::WeakPassword(_)
                | Self::InvitationExpired
                | Self::InvitationEmailMismatch
                | Self::ProjectMismatch
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MissingPermission(_)
                | Self::NotOrganizationOwner
                | Self::CannotModifyOwner
                | Self::CannotLeaveOwnedOrganization
                | Self::CannotRemoveOwner
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::SlugTaken
                | Self::AlreadyMember
                | Self::InvitationAlreadyExists
                | Self::TaskAlreadyAttached
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::OrganizationNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_ORGANIZATION");

        let err = DomainError::MissingPermission("MANAGE_TASKS".to_string());
        assert_eq!(err.code(), "MISSING_PERMISSIONS");

        assert_eq!(DomainError::SlugTaken.code(), "SLUG_TAKEN");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::TaskNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::MemberNotFound.is_not_found());
        assert!(!DomainError::SlugTaken.is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::SlugTaken.is_conflict());
        assert!(DomainError::AlreadyMember.is_conflict());
        assert!(!DomainError::InvitationExpired.is_conflict());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::CannotRemoveOwner.is_authorization());
        assert!(DomainError::MissingPermission("x".to_string()).is_authorization());
        assert!(!DomainError::InvalidEmail.is_authorization());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::TaskNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Task not found: 123");

        let err = DomainError::InvalidPosition(-1);
        assert_eq!(err.to_string(), "Invalid task position: -1");
    }
}
