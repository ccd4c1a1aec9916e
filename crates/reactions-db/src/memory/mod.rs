//! In-memory repositories
//!
//! Same observable semantics as the PostgreSQL adapters (uniqueness per viewer and
//! target, cascades, catalog lookups in upserts), backed by a single shared state.

mod store;

pub use store::MemoryStore;
