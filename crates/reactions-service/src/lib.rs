//! # reactions-service
//!
//! Application layer: viewer identity resolution, reaction reconciliation,
//! count aggregation, the reaction type catalog and target registration.

pub mod dto;
pub mod services;

pub use services::{
    AggregationService, CatalogService, IdentityResolver, ReactOutcome, ReactionService,
    RemoveOutcome, ResolvedIdentity, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TargetService, SESSION_COOKIE_MAX_AGE_SECS, SESSION_COOKIE_NAME,
};
