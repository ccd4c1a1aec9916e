//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in reactions-core.

mod error;
mod reaction;
mod reaction_type;
mod target;

pub use reaction::PgReactionRepository;
pub use reaction_type::PgReactionTypeRepository;
pub use target::PgTargetRepository;
