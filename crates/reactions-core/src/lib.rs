//! # reactions-core
//!
//! Domain layer for emoji reactions: viewers, targets, the reaction type catalog,
//! repository ports and reaction events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AccountDeletionPolicy, Reaction, ReactionCount, ReactionType, Target, DEFAULT_REACTION_TYPES,
};
pub use error::DomainError;
pub use events::ReactionEvent;
pub use traits::{
    CountCache, NoopCountCache, ReactionListener, ReactionRepository, ReactionTypeRepository,
    RepoResult, TargetRepository,
};
pub use value_objects::{
    SessionToken, Snowflake, SnowflakeGenerator, SnowflakeParseError, TargetRef, ViewerKey,
    ViewerKeyParseError,
};
