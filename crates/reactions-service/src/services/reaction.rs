//! Reaction service
//!
//! Reconciles a viewer's requested reaction with the stored one and keeps the
//! one-reaction-per-viewer-per-target invariant. Concurrent requests for the
//! same viewer and target are not coordinated here; the store's unique key on
//! (viewer, target) makes the losing insert update the winning row instead.

use chrono::Utc;
use reactions_core::entities::{AccountDeletionPolicy, Reaction, Target};
use reactions_core::{ReactionEvent, Snowflake, TargetRef, ViewerKey};
use tracing::{info, instrument, warn};

use crate::dto::{reacted_message, removed_message, ReactResponse, RemoveResponse};

use super::aggregation::{counts_with_total, AggregationService};
use super::catalog::CatalogService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::target::TargetService;

/// What `react` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactOutcome {
    Created(Reaction),
    /// Type changed in place; `id` and `created_at` are unchanged
    Updated { reaction: Reaction, previous: String },
    /// Same type requested again, nothing written
    Unchanged(Reaction),
}

impl ReactOutcome {
    pub fn reaction(&self) -> &Reaction {
        match self {
            Self::Created(reaction)
            | Self::Updated { reaction, .. }
            | Self::Unchanged(reaction) => reaction,
        }
    }

    pub fn into_reaction(self) -> Reaction {
        match self {
            Self::Created(reaction)
            | Self::Updated { reaction, .. }
            | Self::Unchanged(reaction) => reaction,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated { .. } => "updated",
            Self::Unchanged(_) => "unchanged",
        }
    }
}

/// What `remove` did. `NotFound` is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(Reaction),
    NotFound,
}

impl RemoveOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create, update or keep the viewer's reaction on a target
    #[instrument(skip(self, viewer, target), fields(viewer = %viewer, target = %target))]
    pub async fn react(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> ServiceResult<ReactOutcome> {
        let (outcome, _) = self.reconcile(viewer, target, reaction_type).await?;
        Ok(outcome)
    }

    /// Delete the viewer's reaction if it has the given type
    #[instrument(skip(self, viewer, target), fields(viewer = %viewer, target = %target))]
    pub async fn remove(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> ServiceResult<RemoveOutcome> {
        let (outcome, _) = self.remove_inner(viewer, target, reaction_type).await?;
        Ok(outcome)
    }

    /// The viewer's active reaction on a target, if any
    #[instrument(skip(self, viewer, target), fields(viewer = %viewer, target = %target))]
    pub async fn current_reaction(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
    ) -> ServiceResult<Option<Reaction>> {
        Ok(self.ctx.reaction_repo().find(viewer, target).await?)
    }

    /// React and build the response the endpoint layer renders: the reaction,
    /// refreshed counts and a confirmation message.
    pub async fn react_and_summarize(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> ServiceResult<ReactResponse> {
        let (outcome, entry) = self.reconcile(viewer, target, reaction_type).await?;
        let counts = AggregationService::new(self.ctx).counts_by_type(target).await?;
        let (counts, total) = counts_with_total(counts);

        let outcome_kind = outcome.kind();
        let previous_type = match &outcome {
            ReactOutcome::Updated { previous, .. } => Some(previous.clone()),
            _ => None,
        };
        let reaction = outcome.into_reaction();

        Ok(ReactResponse {
            outcome: outcome_kind,
            previous_type,
            message: reacted_message(&reaction.reaction_type, &entry.title),
            reaction: reaction.into(),
            counts,
            total,
        })
    }

    /// Remove and build the response the endpoint layer renders
    pub async fn remove_and_summarize(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> ServiceResult<RemoveResponse> {
        let (outcome, entry) = self.remove_inner(viewer, target, reaction_type).await?;
        let counts = AggregationService::new(self.ctx).counts_by_type(target).await?;
        let (counts, total) = counts_with_total(counts);

        Ok(match outcome {
            RemoveOutcome::Removed(reaction) => RemoveResponse {
                removed: true,
                reaction: Some(reaction.into()),
                counts,
                total,
                message: Some(removed_message(&entry.title)),
            },
            RemoveOutcome::NotFound => RemoveResponse {
                removed: false,
                reaction: None,
                counts,
                total,
                message: None,
            },
        })
    }

    /// Content was deleted: drop the target and every reaction on it.
    /// Purging an unknown target is a no-op returning 0.
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn purge_target(&self, target: &TargetRef) -> ServiceResult<u64> {
        let removed = self.ctx.reaction_repo().delete_by_target(target).await?;
        let existed = self.ctx.target_repo().delete(target).await?;

        if !existed && removed == 0 {
            return Ok(0);
        }

        info!(target = %target, removed, "Target reactions purged");
        self.after_mutation(
            Some(target),
            ReactionEvent::TargetReactionsPurged {
                target: target.clone(),
                removed,
                timestamp: Utc::now(),
            },
        )
        .await;

        Ok(removed)
    }

    /// An account was deleted: apply the configured policy to its reactions
    #[instrument(skip(self))]
    pub async fn release_account(
        &self,
        account_id: Snowflake,
    ) -> ServiceResult<(AccountDeletionPolicy, u64)> {
        let policy = self.ctx.settings().after_owner_deletion;

        let affected = match policy {
            AccountDeletionPolicy::Delete => {
                let targets = self.ctx.reaction_repo().targets_by_account(account_id).await?;
                let affected = self.ctx.reaction_repo().delete_by_account(account_id).await?;
                for target in &targets {
                    self.invalidate_counts(target).await;
                }
                affected
            }
            // Counts stay the same, so cached counts stay valid
            AccountDeletionPolicy::ReassignToAnonymous => {
                self.ctx.reaction_repo().reassign_account(account_id).await?
            }
        };

        info!(
            account_id = %account_id,
            policy = policy.as_str(),
            affected,
            "Account reactions released"
        );

        if affected > 0 {
            self.after_mutation(
                None,
                ReactionEvent::AccountReactionsReleased {
                    account_id,
                    policy,
                    affected,
                    timestamp: Utc::now(),
                },
            )
            .await;
        }

        Ok((policy, affected))
    }

    // Catalog check, then target check, then the store
    async fn reconcile(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> ServiceResult<(ReactOutcome, Target)> {
        CatalogService::new(self.ctx).require(reaction_type).await?;
        let entry = TargetService::new(self.ctx).resolve(target).await?;

        let existing = self.ctx.reaction_repo().find(viewer, target).await?;

        let outcome = match existing {
            Some(current) if current.is_type(reaction_type) => {
                return Ok((ReactOutcome::Unchanged(current), entry));
            }
            Some(current) => {
                let previous = current.reaction_type.clone();
                let mut changed = current;
                changed.reaction_type = reaction_type.to_string();
                let reaction = self.ctx.reaction_repo().upsert(&changed).await?;
                ReactOutcome::Updated { reaction, previous }
            }
            None => {
                let fresh = Reaction::new(
                    self.ctx.generate_id(),
                    viewer.clone(),
                    target.clone(),
                    reaction_type.to_string(),
                );
                let reaction = self.ctx.reaction_repo().upsert(&fresh).await?;
                if reaction.id != fresh.id {
                    warn!(viewer = %viewer, target = %target, "Concurrent react merged into existing row");
                }
                ReactOutcome::Created(reaction)
            }
        };

        info!(
            viewer = %viewer,
            target = %target,
            reaction_type = %reaction_type,
            outcome = outcome.kind(),
            "Reaction saved"
        );

        let event = match &outcome {
            ReactOutcome::Updated { previous, .. } => ReactionEvent::ReactionChanged {
                viewer: viewer.clone(),
                target: target.clone(),
                previous_type: previous.clone(),
                reaction_type: reaction_type.to_string(),
                timestamp: Utc::now(),
            },
            _ => ReactionEvent::ReactionAdded {
                viewer: viewer.clone(),
                target: target.clone(),
                reaction_type: reaction_type.to_string(),
                timestamp: Utc::now(),
            },
        };
        self.after_mutation(Some(target), event).await;

        Ok((outcome, entry))
    }

    async fn remove_inner(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> ServiceResult<(RemoveOutcome, Target)> {
        CatalogService::new(self.ctx).require(reaction_type).await?;
        let entry = TargetService::new(self.ctx).resolve(target).await?;

        let Some(existing) = self
            .ctx
            .reaction_repo()
            .find_with_type(viewer, target, reaction_type)
            .await?
        else {
            return Ok((RemoveOutcome::NotFound, entry));
        };

        // Lost a race with another removal of the same row
        if !self.ctx.reaction_repo().delete(existing.id).await? {
            return Ok((RemoveOutcome::NotFound, entry));
        }

        info!(
            viewer = %viewer,
            target = %target,
            reaction_type = %reaction_type,
            "Reaction removed"
        );

        self.after_mutation(
            Some(target),
            ReactionEvent::ReactionRemoved {
                viewer: viewer.clone(),
                target: target.clone(),
                reaction_type: reaction_type.to_string(),
                timestamp: Utc::now(),
            },
        )
        .await;

        Ok((RemoveOutcome::Removed(existing), entry))
    }

    /// Invalidate cached counts first, then tell the listeners
    async fn after_mutation(&self, target: Option<&TargetRef>, event: ReactionEvent) {
        if let Some(target) = target {
            self.invalidate_counts(target).await;
        }
        self.ctx.notify(&event).await;
    }

    async fn invalidate_counts(&self, target: &TargetRef) {
        if let Err(e) = self.ctx.count_cache().invalidate(target).await {
            warn!(target = %target, error = %e, "Count cache invalidation failed");
        }
    }
}
