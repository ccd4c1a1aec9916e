//! Aggregation service
//!
//! Read-only per-target counts, read through the count cache.

use reactions_core::entities::ReactionCount;
use reactions_core::{TargetRef, ViewerKey};
use tracing::{debug, instrument, warn};

use crate::dto::{ReactionCountResponse, ReactionSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::target::TargetService;

pub struct AggregationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AggregationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Counts per reaction type, ordered by catalog display weight then name.
    /// Types nobody picked are omitted.
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn counts_by_type(&self, target: &TargetRef) -> ServiceResult<Vec<ReactionCount>> {
        match self.ctx.count_cache().get(target).await {
            Ok(Some(counts)) => {
                debug!(target = %target, "Count cache hit");
                return Ok(counts);
            }
            Ok(None) => {}
            Err(e) => warn!(target = %target, error = %e, "Count cache read failed"),
        }

        let counts: Vec<ReactionCount> = self
            .ctx
            .reaction_repo()
            .count_by_type(target)
            .await?
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(reaction_type, count)| ReactionCount::new(reaction_type, count))
            .collect();

        if let Err(e) = self.ctx.count_cache().put(target, &counts).await {
            warn!(target = %target, error = %e, "Count cache write failed");
        }

        Ok(counts)
    }

    /// Counts, total and the viewer's active reaction for a registered target
    #[instrument(skip(self, target, viewer), fields(target = %target))]
    pub async fn summary(
        &self,
        target: &TargetRef,
        viewer: Option<&ViewerKey>,
    ) -> ServiceResult<ReactionSummaryResponse> {
        TargetService::new(self.ctx).resolve(target).await?;

        let counts = self.counts_by_type(target).await?;
        let viewer_reaction = match viewer {
            Some(viewer) => self
                .ctx
                .reaction_repo()
                .find(viewer, target)
                .await?
                .map(|r| r.reaction_type),
            None => None,
        };

        let (counts, total) = counts_with_total(counts);
        Ok(ReactionSummaryResponse {
            target_type: target.target_type.clone(),
            target_id: target.target_id.clone(),
            counts,
            total,
            viewer_reaction,
        })
    }
}

/// Map counts to DTOs and sum them
pub(crate) fn counts_with_total(counts: Vec<ReactionCount>) -> (Vec<ReactionCountResponse>, i64) {
    let total = counts.iter().map(|c| c.count).sum();
    (counts.into_iter().map(ReactionCountResponse::from).collect(), total)
}
