//! # reactions-cache
//!
//! Redis layer for the reaction service.
//!
//! - **Connection Pool**: managed Redis connection pool with deadpool
//! - **Count Cache**: per-target aggregate counts, invalidated after every mutation
//! - **Pub/Sub**: reaction events fanned out to `target:<type>:<id>` channels
//!
//! ## Example
//!
//! ```ignore
//! use reactions_cache::{PubSubReactionListener, RedisCountCache, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let cache = RedisCountCache::new(pool.clone(), 300);
//! let listener = PubSubReactionListener::new(Publisher::new(pool));
//! ```

pub mod counts;
pub mod pool;
pub mod pubsub;

pub use counts::RedisCountCache;
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use pubsub::{
    PubSubChannel, PubSubEvent, PubSubReactionListener, Publisher, ACCOUNT_CHANNEL_PREFIX,
    TARGET_CHANNEL_PREFIX,
};
