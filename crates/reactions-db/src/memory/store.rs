use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use reactions_core::entities::{Reaction, ReactionType, Target};
use reactions_core::error::DomainError;
use reactions_core::traits::{
    ReactionRepository, ReactionTypeRepository, RepoResult, TargetRepository,
};
use reactions_core::value_objects::{SessionToken, Snowflake, TargetRef, ViewerKey};

type ReactionKey = (ViewerKey, TargetRef);

#[derive(Default)]
struct State {
    reactions: HashMap<ReactionKey, Reaction>,
    reaction_types: Vec<ReactionType>,
    targets: HashMap<TargetRef, Target>,
}

#[derive(Default)]
struct Shared {
    state: RwLock<State>,
    unavailable: AtomicBool,
    writes: AtomicU64,
}

/// Shared in-memory state handing out repository handles
#[derive(Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reactions(&self) -> Arc<dyn ReactionRepository> {
        Arc::new(MemoryReactionRepository(self.clone()))
    }

    pub fn reaction_types(&self) -> Arc<dyn ReactionTypeRepository> {
        Arc::new(MemoryReactionTypeRepository(self.clone()))
    }

    pub fn targets(&self) -> Arc<dyn TargetRepository> {
        Arc::new(MemoryTargetRepository(self.clone()))
    }

    /// Simulate an outage: every call fails with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.shared.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of mutating calls that reached the store
    pub fn write_count(&self) -> u64 {
        self.shared.writes.load(Ordering::SeqCst)
    }

    /// Total number of reaction rows
    pub fn reaction_rows(&self) -> usize {
        self.shared.state.read().reactions.len()
    }

    /// Rows stored for one viewer on one target (0 or 1)
    pub fn rows_for(&self, viewer: &ViewerKey, target: &TargetRef) -> usize {
        self.shared
            .state
            .read()
            .reactions
            .keys()
            .filter(|(v, t)| v == viewer && t == target)
            .count()
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.shared.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable(
                "in-memory store switched off".to_string(),
            ));
        }
        Ok(())
    }

    fn begin_write(&self) -> RepoResult<()> {
        self.check_available()?;
        self.shared.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct MemoryReactionRepository(MemoryStore);

#[async_trait]
impl ReactionRepository for MemoryReactionRepository {
    async fn find(&self, viewer: &ViewerKey, target: &TargetRef) -> RepoResult<Option<Reaction>> {
        self.0.check_available()?;
        let state = self.0.shared.state.read();
        Ok(state.reactions.get(&(viewer.clone(), target.clone())).cloned())
    }

    async fn find_with_type(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .find(viewer, target)
            .await?
            .filter(|r| r.is_type(reaction_type)))
    }

    async fn upsert(&self, reaction: &Reaction) -> RepoResult<Reaction> {
        self.0.begin_write()?;
        let mut state = self.0.shared.state.write();

        if !state.reaction_types.iter().any(|t| t.name == reaction.reaction_type) {
            return Err(DomainError::UnknownReactionType(reaction.reaction_type.clone()));
        }
        if !state.targets.contains_key(&reaction.target) {
            return Err(DomainError::TargetNotFound(reaction.target.clone()));
        }

        let key = (reaction.viewer.clone(), reaction.target.clone());
        let stored = state
            .reactions
            .entry(key)
            .and_modify(|existing| existing.reaction_type.clone_from(&reaction.reaction_type))
            .or_insert_with(|| reaction.clone());
        Ok(stored.clone())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        self.0.begin_write()?;
        let mut state = self.0.shared.state.write();
        let before = state.reactions.len();
        state.reactions.retain(|_, r| r.id != id);
        Ok(state.reactions.len() < before)
    }

    async fn count_by_type(&self, target: &TargetRef) -> RepoResult<Vec<(String, i64)>> {
        self.0.check_available()?;
        let state = self.0.shared.state.read();

        let mut counts: HashMap<&str, i64> = HashMap::new();
        for reaction in state.reactions.values().filter(|r| &r.target == target) {
            *counts.entry(reaction.reaction_type.as_str()).or_default() += 1;
        }

        // catalog order, like the SQL ORDER BY display_weight, name
        let mut catalog: Vec<&ReactionType> = state.reaction_types.iter().collect();
        catalog.sort_by(|a, b| (a.display_weight, &a.name).cmp(&(b.display_weight, &b.name)));

        Ok(catalog
            .into_iter()
            .filter_map(|t| counts.get(t.name.as_str()).map(|c| (t.name.clone(), *c)))
            .collect())
    }

    async fn delete_by_target(&self, target: &TargetRef) -> RepoResult<u64> {
        self.0.begin_write()?;
        let mut state = self.0.shared.state.write();
        let before = state.reactions.len();
        state.reactions.retain(|(_, t), _| t != target);
        Ok((before - state.reactions.len()) as u64)
    }

    async fn targets_by_type(&self, reaction_type: &str) -> RepoResult<Vec<TargetRef>> {
        self.0.check_available()?;
        let state = self.0.shared.state.read();
        let mut targets: Vec<TargetRef> = state
            .reactions
            .values()
            .filter(|r| r.is_type(reaction_type))
            .map(|r| r.target.clone())
            .collect();
        targets.sort_by_key(ToString::to_string);
        targets.dedup();
        Ok(targets)
    }

    async fn targets_by_account(&self, account_id: Snowflake) -> RepoResult<Vec<TargetRef>> {
        self.0.check_available()?;
        let viewer = ViewerKey::Account(account_id);
        let state = self.0.shared.state.read();
        Ok(state
            .reactions
            .keys()
            .filter(|(v, _)| v == &viewer)
            .map(|(_, t)| t.clone())
            .collect())
    }

    async fn delete_by_account(&self, account_id: Snowflake) -> RepoResult<u64> {
        self.0.begin_write()?;
        let viewer = ViewerKey::Account(account_id);
        let mut state = self.0.shared.state.write();
        let before = state.reactions.len();
        state.reactions.retain(|(v, _), _| v != &viewer);
        Ok((before - state.reactions.len()) as u64)
    }

    async fn reassign_account(&self, account_id: Snowflake) -> RepoResult<u64> {
        self.0.begin_write()?;
        let viewer = ViewerKey::Account(account_id);
        let placeholder = ViewerKey::Anonymous(SessionToken::placeholder_for(account_id));
        let mut state = self.0.shared.state.write();

        let keys: Vec<ReactionKey> = state
            .reactions
            .keys()
            .filter(|(v, _)| v == &viewer)
            .cloned()
            .collect();

        for key in &keys {
            if let Some(mut reaction) = state.reactions.remove(key) {
                reaction.viewer = placeholder.clone();
                state
                    .reactions
                    .insert((placeholder.clone(), reaction.target.clone()), reaction);
            }
        }
        Ok(keys.len() as u64)
    }
}

struct MemoryReactionTypeRepository(MemoryStore);

#[async_trait]
impl ReactionTypeRepository for MemoryReactionTypeRepository {
    async fn list(&self) -> RepoResult<Vec<ReactionType>> {
        self.0.check_available()?;
        let mut types = self.0.shared.state.read().reaction_types.clone();
        types.sort_by(|a, b| (a.display_weight, &a.name).cmp(&(b.display_weight, &b.name)));
        Ok(types)
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ReactionType>> {
        self.0.check_available()?;
        let state = self.0.shared.state.read();
        Ok(state.reaction_types.iter().find(|t| t.name == name).cloned())
    }

    async fn create(&self, reaction_type: &ReactionType) -> RepoResult<()> {
        self.0.begin_write()?;
        let mut state = self.0.shared.state.write();
        if state.reaction_types.iter().any(|t| t.name == reaction_type.name) {
            return Err(DomainError::ReactionTypeExists(reaction_type.name.clone()));
        }
        state.reaction_types.push(reaction_type.clone());
        Ok(())
    }

    async fn delete(&self, name: &str) -> RepoResult<bool> {
        self.0.begin_write()?;
        let mut state = self.0.shared.state.write();
        let before = state.reaction_types.len();
        state.reaction_types.retain(|t| t.name != name);
        if state.reaction_types.len() == before {
            return Ok(false);
        }
        state.reactions.retain(|_, r| r.reaction_type != name);
        Ok(true)
    }
}

struct MemoryTargetRepository(MemoryStore);

#[async_trait]
impl TargetRepository for MemoryTargetRepository {
    async fn find(&self, target: &TargetRef) -> RepoResult<Option<Target>> {
        self.0.check_available()?;
        Ok(self.0.shared.state.read().targets.get(target).cloned())
    }

    async fn register(&self, target: &Target) -> RepoResult<()> {
        self.0.begin_write()?;
        let mut state = self.0.shared.state.write();
        state
            .targets
            .entry(target.target.clone())
            .and_modify(|existing| {
                existing.bundle.clone_from(&target.bundle);
                existing.title.clone_from(&target.title);
            })
            .or_insert_with(|| target.clone());
        Ok(())
    }

    async fn delete(&self, target: &TargetRef) -> RepoResult<bool> {
        self.0.begin_write()?;
        let mut state = self.0.shared.state.write();
        let removed = state.targets.remove(target).is_some();
        if removed {
            state.reactions.retain(|(_, t), _| t != target);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(store: &MemoryStore) -> TargetRef {
        let target = TargetRef::new("node", "1").unwrap();
        let state = &mut store.shared.state.write();
        for (weight, name) in ["like", "love"].into_iter().enumerate() {
            state.reaction_types.push(ReactionType::default_entry(
                Snowflake::new(weight as i64 + 1),
                name,
                weight as i32,
            ));
        }
        state
            .targets
            .insert(target.clone(), Target::new(target.clone(), None, "Post".into()));
        target
    }

    fn reaction(id: i64, viewer: &ViewerKey, target: &TargetRef, kind: &str) -> Reaction {
        Reaction::new(Snowflake::new(id), viewer.clone(), target.clone(), kind.into())
    }

    #[tokio::test]
    async fn test_upsert_keeps_identity_on_type_change() {
        let store = MemoryStore::new();
        let target = seed(&store);
        let repo = store.reactions();
        let viewer = ViewerKey::Account(Snowflake::new(9));

        let first = repo.upsert(&reaction(100, &viewer, &target, "like")).await.unwrap();
        let second = repo.upsert(&reaction(200, &viewer, &target, "love")).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.reaction_type, "love");
        assert_eq!(store.rows_for(&viewer, &target), 1);
    }

    #[tokio::test]
    async fn test_upsert_rejects_unknown_type_and_target() {
        let store = MemoryStore::new();
        let target = seed(&store);
        let repo = store.reactions();
        let viewer = ViewerKey::Account(Snowflake::new(9));

        let err = repo.upsert(&reaction(1, &viewer, &target, "meh")).await.unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_REACTION_TYPE");

        let missing = TargetRef::new("node", "404").unwrap();
        let err = repo.upsert(&reaction(1, &viewer, &missing, "like")).await.unwrap_err();
        assert_eq!(err.code(), "TARGET_NOT_FOUND");
        assert_eq!(store.reaction_rows(), 0);
    }

    #[tokio::test]
    async fn test_deleting_type_or_target_cascades() {
        let store = MemoryStore::new();
        let target = seed(&store);
        let repo = store.reactions();
        repo.upsert(&reaction(1, &ViewerKey::Account(Snowflake::new(1)), &target, "like"))
            .await
            .unwrap();
        repo.upsert(&reaction(2, &ViewerKey::Account(Snowflake::new(2)), &target, "love"))
            .await
            .unwrap();

        assert!(store.reaction_types().delete("like").await.unwrap());
        assert_eq!(store.reaction_rows(), 1);

        assert!(store.targets().delete(&target).await.unwrap());
        assert_eq!(store.reaction_rows(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        let target = seed(&store);
        store.set_unavailable(true);

        let err = store.targets().find(&target).await.unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(store.write_count(), 0);
    }
}
