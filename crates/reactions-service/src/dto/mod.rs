//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateReactionTypeRequest, RegisterTargetRequest};

pub use responses::{
    AccountReleaseResponse, HealthChecks, HealthResponse, PurgeResponse,
    ReactResponse, ReactionCountResponse, ReactionResponse, ReactionSummaryResponse,
    ReactionTypeResponse, ReadinessResponse, RemoveResponse, TargetResponse,
};

pub use mappers::{reacted_message, removed_message};
