//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate the repository ports,
//! the count cache and the event listeners around each use case.

pub mod aggregation;
pub mod catalog;
pub mod context;
pub mod error;
pub mod identity;
pub mod reaction;
pub mod target;

pub use aggregation::AggregationService;
pub use catalog::CatalogService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use identity::{IdentityResolver, ResolvedIdentity, SESSION_COOKIE_MAX_AGE_SECS, SESSION_COOKIE_NAME};
pub use reaction::{ReactOutcome, ReactionService, RemoveOutcome};
pub use target::TargetService;
