//! Reaction model -> entity mapper

use reactions_core::entities::{Reaction, ReactionCount};
use reactions_core::value_objects::{Snowflake, TargetRef, ViewerKey};

use crate::models::{ReactionCountModel, ReactionModel};

impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: Snowflake::new(model.id),
            viewer: ViewerKey::from_columns(model.account_id, &model.session_token),
            target: TargetRef::from_stored(model.target_type, model.target_id),
            reaction_type: model.reaction_type,
            created_at: model.created_at,
        }
    }
}

impl From<ReactionCountModel> for ReactionCount {
    fn from(model: ReactionCountModel) -> Self {
        ReactionCount::new(model.reaction_type, model.count)
    }
}
