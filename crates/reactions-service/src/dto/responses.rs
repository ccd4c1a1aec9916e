//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Catalog Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReactionTypeResponse {
    pub id: String,
    pub name: String,
    pub uses_animated_icon: bool,
    pub icon_ref: String,
    pub display_weight: i32,
}

// ============================================================================
// Target Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TargetResponse {
    pub target_type: String,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Result of the content-deletion cascade
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub target_type: String,
    pub target_id: String,
    pub removed: u64,
}

/// Result of applying the account deletion policy
#[derive(Debug, Clone, Serialize)]
pub struct AccountReleaseResponse {
    pub account_id: String,
    pub policy: String,
    pub affected: u64,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// One viewer's reaction
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub id: String,
    pub reaction_type: String,
    pub target_type: String,
    pub target_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionCountResponse {
    pub reaction_type: String,
    pub count: i64,
}

/// Aggregate view of a target, plus the current viewer's choice
#[derive(Debug, Clone, Serialize)]
pub struct ReactionSummaryResponse {
    pub target_type: String,
    pub target_id: String,
    pub counts: Vec<ReactionCountResponse>,
    pub total: i64,
    pub viewer_reaction: Option<String>,
}

/// Result of a react call
#[derive(Debug, Clone, Serialize)]
pub struct ReactResponse {
    /// `created`, `updated` or `unchanged`
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_type: Option<String>,
    pub reaction: ReactionResponse,
    pub counts: Vec<ReactionCountResponse>,
    pub total: i64,
    pub message: String,
}

/// Result of a remove call. `removed: false` is a normal answer.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<ReactionResponse>,
    pub counts: Vec<ReactionCountResponse>,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    /// `disabled` when no Redis is configured
    pub redis: String,
}

impl ReadinessResponse {
    /// `redis_healthy` is `None` when Redis is not configured
    pub fn ready(database_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = database_healthy && redis_healthy.unwrap_or(true);
        let status = |healthy: bool| if healthy { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: status(database_healthy),
                redis: redis_healthy.map_or_else(|| "disabled".to_string(), status),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
