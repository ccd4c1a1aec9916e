//! Aggregate count cache

mod redis_counts;

pub use redis_counts::RedisCountCache;
