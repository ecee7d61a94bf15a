//! # trellis-cache
//!
//! Redis caching layer for authentication sessions and per-user state.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Refresh Tokens**: Revocable authentication sessions with TTL
//! - **Active Organization**: The organization a user is currently working in

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{ActiveOrganizationStore, RefreshTokenData, RefreshTokenStore};
