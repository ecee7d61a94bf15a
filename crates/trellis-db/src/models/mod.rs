//! Database models - SQLx-compatible structs for PostgreSQL tables

mod change_log;
mod invitation;
mod member;
mod milestone;
mod organization;
mod project;
mod task;
mod user;

pub use change_log::ChangeLogModel;
pub use invitation::InvitationModel;
pub use member::MemberModel;
pub use milestone::{MilestoneModel, MilestoneTaskModel};
pub use organization::OrganizationModel;
pub use project::ProjectModel;
pub use task::TaskModel;
pub use user::UserModel;
