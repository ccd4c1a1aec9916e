mod hooks;
mod repositories;

pub use hooks::{CountCache, NoopCountCache, ReactionListener};
pub use repositories::{ReactionRepository, ReactionTypeRepository, RepoResult, TargetRepository};
