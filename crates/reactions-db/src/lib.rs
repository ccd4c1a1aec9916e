//! # reactions-db
//!
//! Storage adapters for the repository traits defined in `reactions-core`.
//!
//! - [`repositories`]: PostgreSQL via SQLx. The uniqueness of a viewer's reaction on a
//!   target is enforced by the `reactions_viewer_target_key` constraint and upserts are a
//!   single `INSERT ... ON CONFLICT` statement.
//! - [`memory`]: in-process adapters with the same semantics, for tests and local runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reactions_db::{create_pool, run_migrations, DatabaseConfig, PgReactionRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!     let reactions = PgReactionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgReactionRepository, PgReactionTypeRepository, PgTargetRepository};
