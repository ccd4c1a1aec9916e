//! Test fixtures and response shapes
//!
//! Provides reusable test data and the JSON bodies the API returns.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Unique content id, so tests sharing a PostgreSQL database stay apart
pub fn unique_target_id() -> String {
    format!("it-{}-{}", std::process::id(), unique_suffix())
}

/// Add reaction type request
#[derive(Debug, Serialize)]
pub struct CreateReactionType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_weight: Option<i32>,
}

impl CreateReactionType {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_weight: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReactionTypeBody {
    pub id: String,
    pub name: String,
    pub uses_animated_icon: bool,
    pub icon_ref: String,
    pub display_weight: i32,
}

#[derive(Debug, Deserialize)]
pub struct TargetBody {
    pub target_type: String,
    pub target_id: String,
    pub bundle: Option<String>,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ReactionBody {
    pub id: String,
    pub reaction_type: String,
    pub target_type: String,
    pub target_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountBody {
    pub reaction_type: String,
    pub count: i64,
}

impl CountBody {
    pub fn of(reaction_type: &str, count: i64) -> Self {
        Self {
            reaction_type: reaction_type.to_string(),
            count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReactBody {
    pub outcome: String,
    pub previous_type: Option<String>,
    pub reaction: ReactionBody,
    pub counts: Vec<CountBody>,
    pub total: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveBody {
    pub removed: bool,
    pub reaction: Option<ReactionBody>,
    pub counts: Vec<CountBody>,
    pub total: i64,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryBody {
    pub target_type: String,
    pub target_id: String,
    pub counts: Vec<CountBody>,
    pub total: i64,
    pub viewer_reaction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PurgeBody {
    pub removed: u64,
}

#[derive(Debug, Deserialize)]
pub struct AccountReleaseBody {
    pub account_id: String,
    pub policy: String,
    pub affected: u64,
}

#[derive(Debug, Deserialize)]
pub struct ReadinessBody {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Deserialize)]
pub struct ReadinessChecks {
    pub database: String,
    pub redis: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
