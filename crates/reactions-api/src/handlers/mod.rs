//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod reaction_types;
pub mod reactions;
pub mod session;
pub mod targets;
