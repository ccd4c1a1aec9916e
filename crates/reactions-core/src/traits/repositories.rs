//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL, or in-memory for tests).

use async_trait::async_trait;

use crate::entities::{Reaction, ReactionType, Target};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, TargetRef, ViewerKey};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the viewer's reaction on a target, whatever its type
    async fn find(&self, viewer: &ViewerKey, target: &TargetRef) -> RepoResult<Option<Reaction>>;

    /// Find the viewer's reaction on a target only if it has the given type
    async fn find_with_type(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> RepoResult<Option<Reaction>>;

    /// Insert the reaction, or change the type of the viewer's existing reaction
    /// on the same target. Must be atomic on (viewer, target). Returns the stored
    /// row, keeping the existing `id` and `created_at` on update.
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<Reaction>;

    /// Delete a reaction by id. Returns false if it was already gone.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// Count reactions on a target grouped by type name (zero counts absent)
    async fn count_by_type(&self, target: &TargetRef) -> RepoResult<Vec<(String, i64)>>;

    /// Delete every reaction on a target
    async fn delete_by_target(&self, target: &TargetRef) -> RepoResult<u64>;

    /// Targets carrying at least one reaction of the given type
    async fn targets_by_type(&self, reaction_type: &str) -> RepoResult<Vec<TargetRef>>;

    /// Targets an account currently has a reaction on
    async fn targets_by_account(&self, account_id: Snowflake) -> RepoResult<Vec<TargetRef>>;

    /// Delete every reaction owned by an account
    async fn delete_by_account(&self, account_id: Snowflake) -> RepoResult<u64>;

    /// Move an account's reactions to its anonymous placeholder owner
    async fn reassign_account(&self, account_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Reaction Type Repository
// ============================================================================

#[async_trait]
pub trait ReactionTypeRepository: Send + Sync {
    /// List the catalog ordered by display weight, then name
    async fn list(&self) -> RepoResult<Vec<ReactionType>>;

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ReactionType>>;

    /// Fails with `ReactionTypeExists` on a duplicate name
    async fn create(&self, reaction_type: &ReactionType) -> RepoResult<()>;

    /// Remove a catalog entry together with every reaction of that type
    async fn delete(&self, name: &str) -> RepoResult<bool>;
}

// ============================================================================
// Target Repository
// ============================================================================

#[async_trait]
pub trait TargetRepository: Send + Sync {
    async fn find(&self, target: &TargetRef) -> RepoResult<Option<Target>>;

    /// Insert or refresh title and bundle
    async fn register(&self, target: &Target) -> RepoResult<()>;

    /// Delete the target; its reactions go with it
    async fn delete(&self, target: &TargetRef) -> RepoResult<bool>;
}
