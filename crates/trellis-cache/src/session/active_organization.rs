//! Active organization storage in Redis.
//!
//! Remembers which organization each user is currently working in, so the
//! client can reload into the right tenant. Written by the
//! set-active-organization endpoint after a membership check.

use trellis_core::Snowflake;

use crate::pool::{RedisPool, RedisResult};

/// Key prefix for active organization entries
const ACTIVE_ORG_PREFIX: &str = "active_org:";

/// TTL for active organization entries (30 days; refreshed on every set)
const ACTIVE_ORG_TTL: u64 = 30 * 24 * 60 * 60;

/// Store for each user's active organization
#[derive(Clone)]
pub struct ActiveOrganizationStore {
    pool: RedisPool,
}

impl ActiveOrganizationStore {
    /// Create a new active organization store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(user_id: Snowflake) -> String {
        format!("{ACTIVE_ORG_PREFIX}{user_id}")
    }

    /// Record the user's active organization
    pub async fn set(&self, user_id: Snowflake, organization_id: Snowflake) -> RedisResult<()> {
        self.pool
            .set(&Self::key(user_id), &organization_id, Some(ACTIVE_ORG_TTL))
            .await?;

        tracing::debug!(
            user_id = %user_id,
            organization_id = %organization_id,
            "Set active organization"
        );

        Ok(())
    }

    /// Get the user's active organization, if any
    pub async fn get(&self, user_id: Snowflake) -> RedisResult<Option<Snowflake>> {
        self.pool.get_value(&Self::key(user_id)).await
    }

    /// Clear the user's active organization (e.g. after leaving the org)
    pub async fn clear(&self, user_id: Snowflake) -> RedisResult<bool> {
        self.pool.delete(&Self::key(user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() {
        assert_eq!(
            ActiveOrganizationStore::key(Snowflake::new(42)),
            "active_org:42".to_string()
        );
    }
}
