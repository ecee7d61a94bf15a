//! # trellis-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export the public service surface
pub use dto::requests::{
    CreateInvitationRequest, CreateMilestoneRequest, CreateOrganizationRequest,
    CreateProjectRequest, CreateTaskRequest, LoginRequest, LogoutRequest, MoveTaskRequest,
    RefreshTokenRequest, RegisterRequest, ReorderTasksRequest, SetActiveOrganizationRequest,
    TaskPositionEntry, TransferOwnershipRequest, UpdateMemberRoleRequest, UpdateMilestoneRequest,
    UpdateOrganizationRequest, UpdateProjectRequest, UpdateTaskRequest, UpdateUserRequest,
};
pub use dto::responses::{
    ActiveOrganizationResponse, AuthResponse, ChangeLogResponse, CurrentUserResponse,
    HealthResponse, InvitationResponse, MemberResponse, MilestoneResponse,
    MilestoneWithCountsResponse, OrganizationResponse, OrganizationWithCountsResponse,
    ProjectResponse, ReadinessResponse, TaskResponse, UserResponse,
};
pub use services::{
    AuthService, InvitationService, MemberService, MilestoneService, OrganizationService,
    PermissionService, ProjectService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TaskService, UserService,
};
