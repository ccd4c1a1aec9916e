//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use reactions_core::entities::{Reaction, ReactionCount, ReactionType, Target};

use super::responses::{
    ReactionCountResponse, ReactionResponse, ReactionTypeResponse, TargetResponse,
};

impl From<&ReactionType> for ReactionTypeResponse {
    fn from(reaction_type: &ReactionType) -> Self {
        Self {
            id: reaction_type.id.to_string(),
            name: reaction_type.name.clone(),
            uses_animated_icon: reaction_type.uses_animated_icon,
            icon_ref: reaction_type.icon_ref.clone(),
            display_weight: reaction_type.display_weight,
        }
    }
}

impl From<ReactionType> for ReactionTypeResponse {
    fn from(reaction_type: ReactionType) -> Self {
        Self::from(&reaction_type)
    }
}

impl From<&Target> for TargetResponse {
    fn from(target: &Target) -> Self {
        Self {
            target_type: target.target.target_type.clone(),
            target_id: target.target.target_id.clone(),
            bundle: target.bundle.clone(),
            title: target.title.clone(),
            created_at: target.created_at,
        }
    }
}

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id.to_string(),
            reaction_type: reaction.reaction_type.clone(),
            target_type: reaction.target.target_type.clone(),
            target_id: reaction.target.target_id.clone(),
            created_at: reaction.created_at,
        }
    }
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self::from(&reaction)
    }
}

impl From<ReactionCount> for ReactionCountResponse {
    fn from(count: ReactionCount) -> Self {
        Self {
            reaction_type: count.reaction_type,
            count: count.count,
        }
    }
}

/// Confirmation shown after a successful react
pub fn reacted_message(reaction_type: &str, title: &str) -> String {
    format!("You reacted \"{reaction_type}\" on \"{title}\"")
}

/// Confirmation shown after a successful removal
pub fn removed_message(title: &str) -> String {
    format!("Reaction removed on \"{title}\"")
}
