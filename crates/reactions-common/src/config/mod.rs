//! Configuration structs

mod app_config;

pub use app_config::{
    AnonymousAccess, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ReactionsConfig, RedisConfig, ServerConfig, SnowflakeConfig,
};
