//! Service context - dependency container for services
//!
//! Holds the repository ports, the count cache, the event listeners and the
//! reaction settings every service borrows.

use std::sync::Arc;

use reactions_common::ReactionsConfig;
use reactions_core::traits::{
    CountCache, NoopCountCache, ReactionListener, ReactionRepository, ReactionTypeRepository,
    TargetRepository,
};
use reactions_core::{ReactionEvent, Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Adapters are injected as trait objects so the same services run over
/// PostgreSQL in production and over the in-memory store in tests.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    reaction_repo: Arc<dyn ReactionRepository>,
    reaction_type_repo: Arc<dyn ReactionTypeRepository>,
    target_repo: Arc<dyn TargetRepository>,

    // Hooks
    count_cache: Arc<dyn CountCache>,
    listeners: Vec<Arc<dyn ReactionListener>>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    settings: Arc<ReactionsConfig>,
}

impl ServiceContext {
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        reaction_type_repo: Arc<dyn ReactionTypeRepository>,
        target_repo: Arc<dyn TargetRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        settings: ReactionsConfig,
    ) -> Self {
        Self {
            reaction_repo,
            reaction_type_repo,
            target_repo,
            count_cache: Arc::new(NoopCountCache),
            listeners: Vec::new(),
            snowflake_generator,
            settings: Arc::new(settings),
        }
    }

    // === Repositories ===

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn reaction_type_repo(&self) -> &dyn ReactionTypeRepository {
        self.reaction_type_repo.as_ref()
    }

    pub fn target_repo(&self) -> &dyn TargetRepository {
        self.target_repo.as_ref()
    }

    // === Hooks ===

    pub fn count_cache(&self) -> &dyn CountCache {
        self.count_cache.as_ref()
    }

    /// Deliver an event to every listener. Failures are logged and dropped.
    pub async fn notify(&self, event: &ReactionEvent) {
        for listener in &self.listeners {
            if let Err(e) = listener.on_event(event).await {
                tracing::warn!(
                    event = event.event_type(),
                    error = %e,
                    "Reaction listener failed"
                );
            }
        }
    }

    // === Utilities ===

    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    pub fn settings(&self) -> &ReactionsConfig {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("listeners", &self.listeners.len())
            .field("target_entities", &self.settings.target_entities)
            .field("after_owner_deletion", &self.settings.after_owner_deletion)
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
pub struct ServiceContextBuilder {
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    reaction_type_repo: Option<Arc<dyn ReactionTypeRepository>>,
    target_repo: Option<Arc<dyn TargetRepository>>,
    count_cache: Option<Arc<dyn CountCache>>,
    listeners: Vec<Arc<dyn ReactionListener>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    settings: ReactionsConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            reaction_repo: None,
            reaction_type_repo: None,
            target_repo: None,
            count_cache: None,
            listeners: Vec::new(),
            snowflake_generator: None,
            settings: ReactionsConfig::default(),
        }
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn reaction_type_repo(mut self, repo: Arc<dyn ReactionTypeRepository>) -> Self {
        self.reaction_type_repo = Some(repo);
        self
    }

    pub fn target_repo(mut self, repo: Arc<dyn TargetRepository>) -> Self {
        self.target_repo = Some(repo);
        self
    }

    /// Defaults to a cache that stores nothing
    pub fn count_cache(mut self, cache: Arc<dyn CountCache>) -> Self {
        self.count_cache = Some(cache);
        self
    }

    pub fn listener(mut self, listener: Arc<dyn ReactionListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: ReactionsConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let mut ctx = ServiceContext::new(
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.reaction_type_repo
                .ok_or_else(|| ServiceError::validation("reaction_type_repo is required"))?,
            self.target_repo
                .ok_or_else(|| ServiceError::validation("target_repo is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.settings,
        );
        if let Some(cache) = self.count_cache {
            ctx.count_cache = cache;
        }
        ctx.listeners = self.listeners;
        Ok(ctx)
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
