//! Axum extractors for request handling
//!
//! Custom extractors for the viewer identity, admin access, paths and validation.

mod admin;
mod auth;
mod path;
mod validated;
mod viewer;

pub use admin::{AdminAuth, ADMIN_TOKEN_HEADER};
pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{AccountPath, ApiPath, ReactionTypePath, TargetPath, TargetReactionPath};
pub use validated::ValidatedJson;
pub use viewer::{clear_session, session_cookie, ViewerContext};
