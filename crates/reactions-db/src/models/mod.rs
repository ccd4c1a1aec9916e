//! Database models - SQLx-compatible structs for PostgreSQL tables

mod reaction;
mod reaction_type;
mod target;

pub use reaction::{ReactionCountModel, ReactionModel};
pub use reaction_type::ReactionTypeModel;
pub use target::TargetModel;
