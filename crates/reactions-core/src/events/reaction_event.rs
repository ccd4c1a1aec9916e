//! Reaction events - emitted after a reaction mutation succeeds
//!
//! Listeners receive these through [`crate::ReactionListener`]; the cache crate
//! forwards them to Redis pub/sub so rendered pages can refresh their counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::AccountDeletionPolicy;
use crate::value_objects::{Snowflake, TargetRef, ViewerKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionEvent {
    ReactionAdded {
        viewer: ViewerKey,
        target: TargetRef,
        reaction_type: String,
        timestamp: DateTime<Utc>,
    },
    ReactionChanged {
        viewer: ViewerKey,
        target: TargetRef,
        previous_type: String,
        reaction_type: String,
        timestamp: DateTime<Utc>,
    },
    ReactionRemoved {
        viewer: ViewerKey,
        target: TargetRef,
        reaction_type: String,
        timestamp: DateTime<Utc>,
    },
    TargetReactionsPurged {
        target: TargetRef,
        removed: u64,
        timestamp: DateTime<Utc>,
    },
    AccountReactionsReleased {
        account_id: Snowflake,
        policy: AccountDeletionPolicy,
        affected: u64,
        timestamp: DateTime<Utc>,
    },
}

impl ReactionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionAdded { .. } => "REACTION_ADDED",
            Self::ReactionChanged { .. } => "REACTION_CHANGED",
            Self::ReactionRemoved { .. } => "REACTION_REMOVED",
            Self::TargetReactionsPurged { .. } => "TARGET_REACTIONS_PURGED",
            Self::AccountReactionsReleased { .. } => "ACCOUNT_REACTIONS_RELEASED",
        }
    }

    /// Target whose counts changed, if the event concerns a single target
    pub fn target(&self) -> Option<&TargetRef> {
        match self {
            Self::ReactionAdded { target, .. }
            | Self::ReactionChanged { target, .. }
            | Self::ReactionRemoved { target, .. }
            | Self::TargetReactionsPurged { target, .. } => Some(target),
            Self::AccountReactionsReleased { .. } => None,
        }
    }

    /// Viewer behind a single-reaction event
    pub fn viewer(&self) -> Option<&ViewerKey> {
        match self {
            Self::ReactionAdded { viewer, .. }
            | Self::ReactionChanged { viewer, .. }
            | Self::ReactionRemoved { viewer, .. } => Some(viewer),
            Self::TargetReactionsPurged { .. } | Self::AccountReactionsReleased { .. } => None,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ReactionAdded { timestamp, .. }
            | Self::ReactionChanged { timestamp, .. }
            | Self::ReactionRemoved { timestamp, .. }
            | Self::TargetReactionsPurged { timestamp, .. }
            | Self::AccountReactionsReleased { timestamp, .. } => *timestamp,
        }
    }
}
