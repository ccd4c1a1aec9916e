//! Domain entities - core business objects

mod reaction;
mod reaction_type;
mod target;

pub use reaction::{AccountDeletionPolicy, Reaction, ReactionCount};
pub use reaction_type::{ReactionType, DEFAULT_REACTION_TYPES, MAX_NAME_LEN};
pub use target::Target;
