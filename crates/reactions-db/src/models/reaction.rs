//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the reactions table joined with its type name
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub account_id: i64,
    pub session_token: String,
    pub target_type: String,
    pub target_id: String,
    pub reaction_type: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated reaction count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub reaction_type: String,
    pub count: i64,
}
