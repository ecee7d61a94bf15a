//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ChangeLogRepository, InvitationRepository, MemberRepository, MilestoneRepository,
    OrganizationRepository, ProjectRepository, RepoResult, TaskPositionUpdate, TaskQuery,
    TaskRepository, UserRepository,
};
