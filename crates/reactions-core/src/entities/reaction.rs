//! Reaction entity - one viewer's chosen reaction type on one target

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Snowflake, TargetRef, ViewerKey};

/// At most one reaction exists per (viewer, target). Changing the type mutates
/// the record in place, so `id` and `created_at` survive type changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub viewer: ViewerKey,
    pub target: TargetRef,
    pub reaction_type: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(id: Snowflake, viewer: ViewerKey, target: TargetRef, reaction_type: String) -> Self {
        Self {
            id,
            viewer,
            target,
            reaction_type,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_type(&self, reaction_type: &str) -> bool {
        self.reaction_type == reaction_type
    }
}

/// Number of reactions of one type on a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub reaction_type: String,
    pub count: i64,
}

impl ReactionCount {
    pub fn new(reaction_type: impl Into<String>, count: i64) -> Self {
        Self {
            reaction_type: reaction_type.into(),
            count,
        }
    }
}

/// What happens to an account's reactions when the account is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountDeletionPolicy {
    #[default]
    Delete,
    /// Keep the reactions (and therefore the counts) under an anonymous placeholder owner
    #[serde(rename = "set_to_anonymous")]
    ReassignToAnonymous,
}

impl AccountDeletionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "delete" => Some(Self::Delete),
            "set_to_anonymous" | "reassign" | "anonymize" => Some(Self::ReassignToAnonymous),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::ReassignToAnonymous => "set_to_anonymous",
        }
    }
}
