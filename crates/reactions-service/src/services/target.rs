//! Target service
//!
//! Registers the content items reactions may point at and resolves a
//! reference to a reactable target.

use reactions_core::entities::Target;
use reactions_core::{DomainError, TargetRef};
use tracing::{info, instrument};

use crate::dto::RegisterTargetRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct TargetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TargetService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a target, or refresh its title and bundle
    #[instrument(skip(self, request), fields(target = %target))]
    pub async fn register(
        &self,
        target: TargetRef,
        request: RegisterTargetRequest,
    ) -> ServiceResult<Target> {
        let entry = Target::new(target.clone(), request.bundle, request.title);
        self.ctx.target_repo().register(&entry).await?;

        info!(target = %target, bundle = ?entry.bundle, "Target registered");

        // The stored row keeps its original created_at on refresh
        Ok(self.ctx.target_repo().find(&target).await?.unwrap_or(entry))
    }

    /// Load a target and check it is enabled for reactions.
    ///
    /// Fails with `TargetNotFound` when the content item is not registered and
    /// `TargetNotReactable` when the allow-list excludes it.
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn resolve(&self, target: &TargetRef) -> ServiceResult<Target> {
        let entry = self
            .ctx
            .target_repo()
            .find(target)
            .await?
            .ok_or_else(|| DomainError::TargetNotFound(target.clone()))?;

        if !entry.is_allowed_by(&self.ctx.settings().target_entities) {
            return Err(DomainError::TargetNotReactable(target.clone()).into());
        }

        Ok(entry)
    }
}
