use reactions_core::entities::ReactionType;
use reactions_core::value_objects::Snowflake;

use crate::models::ReactionTypeModel;

impl From<ReactionTypeModel> for ReactionType {
    fn from(model: ReactionTypeModel) -> Self {
        ReactionType {
            id: Snowflake::new(model.id),
            name: model.name,
            uses_animated_icon: model.uses_animated_icon,
            icon_ref: model.icon_ref,
            display_weight: model.display_weight,
            created_at: model.created_at,
        }
    }
}
