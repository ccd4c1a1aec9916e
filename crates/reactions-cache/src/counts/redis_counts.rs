//! Redis-backed cache of per-target reaction counts

use async_trait::async_trait;

use reactions_core::entities::ReactionCount;
use reactions_core::traits::CountCache;
use reactions_core::value_objects::TargetRef;
use reactions_core::DomainError;

use crate::pool::RedisPool;

const KEY_PREFIX: &str = "reaction_counts:";

/// Counts are stored as a JSON array under `reaction_counts:<type>:<id>` with a TTL.
///
/// Writers invalidate after every mutation, but a reader that loaded counts
/// before a concurrent mutation can still put them back after the
/// invalidation. Such stale entries live until the TTL expires.
#[derive(Clone, Debug)]
pub struct RedisCountCache {
    pool: RedisPool,
    ttl_secs: u64,
}

impl RedisCountCache {
    pub fn new(pool: RedisPool, ttl_secs: u64) -> Self {
        Self { pool, ttl_secs }
    }

    fn key(target: &TargetRef) -> String {
        format!("{KEY_PREFIX}{target}")
    }
}

#[async_trait]
impl CountCache for RedisCountCache {
    async fn get(&self, target: &TargetRef) -> Result<Option<Vec<ReactionCount>>, DomainError> {
        Ok(self.pool.get_json(&Self::key(target)).await?)
    }

    async fn put(&self, target: &TargetRef, counts: &[ReactionCount]) -> Result<(), DomainError> {
        self.pool
            .set_json(&Self::key(target), counts, self.ttl_secs)
            .await?;
        Ok(())
    }

    async fn invalidate(&self, target: &TargetRef) -> Result<(), DomainError> {
        let removed = self.pool.delete(&Self::key(target)).await?;
        tracing::debug!(target = %target, removed, "Invalidated cached counts");
        Ok(())
    }
}
