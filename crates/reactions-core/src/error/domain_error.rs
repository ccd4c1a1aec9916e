//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::TargetRef;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Target not found: {0}")]
    TargetNotFound(TargetRef),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Unknown reaction type: {0}")]
    UnknownReactionType(String),

    #[error("Invalid reaction type name: {0}")]
    InvalidReactionTypeName(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Reactions are not enabled on {0}")]
    TargetNotReactable(TargetRef),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction type already exists: {0}")]
    ReactionTypeExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Reaction store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::TargetNotFound(_) => "TARGET_NOT_FOUND",

            Self::UnknownReactionType(_) => "UNKNOWN_REACTION_TYPE",
            Self::InvalidReactionTypeName(_) => "INVALID_REACTION_TYPE_NAME",
            Self::InvalidTarget(_) => "INVALID_TARGET",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            Self::TargetNotReactable(_) => "TARGET_NOT_REACTABLE",

            Self::ReactionTypeExists(_) => "REACTION_TYPE_EXISTS",

            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TargetNotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownReactionType(_)
                | Self::InvalidReactionTypeName(_)
                | Self::InvalidTarget(_)
                | Self::ValidationError(_)
        )
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::TargetNotReactable(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionTypeExists(_))
    }

    /// Transient infrastructure failure the caller may retry
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
