//! Session storage module.
//!
//! Redis-backed storage for:
//! - Refresh tokens (authentication sessions)
//! - Active organization (which tenant a user is currently working in)

mod active_organization;
mod refresh_token;

pub use active_organization::ActiveOrganizationStore;
pub use refresh_token::{RefreshTokenData, RefreshTokenStore};
