//! Hooks invoked by the reconciliation service after a mutation

use async_trait::async_trait;

use crate::entities::ReactionCount;
use crate::error::DomainError;
use crate::events::ReactionEvent;
use crate::value_objects::TargetRef;

/// Cache of per-target aggregate counts.
///
/// The service invalidates a target's entry after every successful mutation.
/// Implementations are best effort: callers log failures and fall back to the store.
#[async_trait]
pub trait CountCache: Send + Sync {
    async fn get(&self, target: &TargetRef) -> Result<Option<Vec<ReactionCount>>, DomainError>;

    async fn put(&self, target: &TargetRef, counts: &[ReactionCount]) -> Result<(), DomainError>;

    async fn invalidate(&self, target: &TargetRef) -> Result<(), DomainError>;
}

/// Cache that stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCountCache;

#[async_trait]
impl CountCache for NoopCountCache {
    async fn get(&self, _target: &TargetRef) -> Result<Option<Vec<ReactionCount>>, DomainError> {
        Ok(None)
    }

    async fn put(&self, _target: &TargetRef, _counts: &[ReactionCount]) -> Result<(), DomainError> {
        Ok(())
    }

    async fn invalidate(&self, _target: &TargetRef) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Receives events after successful mutations. A failing listener never fails
/// the mutation that triggered it.
#[async_trait]
pub trait ReactionListener: Send + Sync {
    async fn on_event(&self, event: &ReactionEvent) -> Result<(), DomainError>;
}
