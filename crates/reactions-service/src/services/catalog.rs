//! Catalog service
//!
//! Owns the reaction type catalog: listing, lookup, operator edits and the
//! default set installed on first start.

use reactions_core::entities::{ReactionType, DEFAULT_REACTION_TYPES};
use reactions_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::CreateReactionTypeRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Catalog ordered by display weight, then name
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<ReactionType>> {
        Ok(self.ctx.reaction_type_repo().list().await?)
    }

    /// Look up a type a viewer asked for. Any name outside the catalog,
    /// including malformed ones, is `UnknownReactionType`.
    #[instrument(skip(self))]
    pub async fn require(&self, name: &str) -> ServiceResult<ReactionType> {
        if ReactionType::validate_name(name).is_err() {
            return Err(DomainError::UnknownReactionType(name.to_string()).into());
        }

        self.ctx
            .reaction_type_repo()
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::UnknownReactionType(name.to_string()).into())
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateReactionTypeRequest) -> ServiceResult<ReactionType> {
        let display_weight = match request.display_weight {
            Some(weight) => weight,
            None => self.next_weight().await?,
        };
        let icon_ref = request.icon_ref.unwrap_or_else(|| request.name.clone());

        let reaction_type = ReactionType::new(
            self.ctx.generate_id(),
            request.name,
            request.uses_animated_icon,
            icon_ref,
            display_weight,
        )?;
        self.ctx.reaction_type_repo().create(&reaction_type).await?;

        info!(
            name = %reaction_type.name,
            display_weight = reaction_type.display_weight,
            "Reaction type created"
        );

        Ok(reaction_type)
    }

    /// Remove a catalog entry. Reactions of that type go with it.
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> ServiceResult<()> {
        let affected = self.ctx.reaction_repo().targets_by_type(name).await?;

        if !self.ctx.reaction_type_repo().delete(name).await? {
            return Err(ServiceError::not_found("Reaction type", name));
        }

        for target in &affected {
            if let Err(e) = self.ctx.count_cache().invalidate(target).await {
                warn!(target = %target, error = %e, "Count cache invalidation failed");
            }
        }

        info!(name = %name, targets = affected.len(), "Reaction type deleted");
        Ok(())
    }

    /// Create the default types that are missing. Returns how many were added.
    #[instrument(skip(self))]
    pub async fn install_defaults(&self) -> ServiceResult<usize> {
        let mut installed = 0;

        for (weight, name) in DEFAULT_REACTION_TYPES.iter().enumerate() {
            if self.ctx.reaction_type_repo().find_by_name(name).await?.is_some() {
                continue;
            }

            let entry = ReactionType::default_entry(self.ctx.generate_id(), name, weight as i32);
            match self.ctx.reaction_type_repo().create(&entry).await {
                Ok(()) => installed += 1,
                // Another instance installed it first
                Err(DomainError::ReactionTypeExists(_)) => {
                    warn!(name = %name, "Default reaction type appeared concurrently");
                }
                Err(e) => return Err(e.into()),
            }
        }

        if installed > 0 {
            info!(installed, "Default reaction types installed");
        }
        Ok(installed)
    }

    async fn next_weight(&self) -> ServiceResult<i32> {
        let types = self.ctx.reaction_type_repo().list().await?;
        Ok(types
            .iter()
            .map(|t| t.display_weight)
            .max()
            .map_or(0, |max| max + 1))
    }
}
