//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in trellis-core.
//! Each repository handles database operations for a specific domain entity.

mod change_log;
mod error;
mod invitation;
mod member;
mod milestone;
mod organization;
mod project;
mod task;
mod user;

pub use change_log::PgChangeLogRepository;
pub use invitation::PgInvitationRepository;
pub use member::PgMemberRepository;
pub use milestone::PgMilestoneRepository;
pub use organization::PgOrganizationRepository;
pub use project::PgProjectRepository;
pub use task::PgTaskRepository;
pub use user::PgUserRepository;
