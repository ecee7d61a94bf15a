//! # trellis-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `trellis-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//! - SQL migrations (`migrations/`)

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgChangeLogRepository, PgInvitationRepository, PgMemberRepository, PgMilestoneRepository,
    PgOrganizationRepository, PgProjectRepository, PgTaskRepository, PgUserRepository,
};
