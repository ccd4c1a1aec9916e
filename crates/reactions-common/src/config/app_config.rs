//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use reactions_core::{AccountDeletionPolicy, SnowflakeGenerator};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    /// No Redis means no count cache and no pub/sub fan-out
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub reactions: ReactionsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT validation settings. Tokens are issued by the host site; we only verify them.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// What anonymous visitors may do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AnonymousAccess {
    pub can_view: bool,
    pub can_react: bool,
    pub can_remove: bool,
}

impl Default for AnonymousAccess {
    fn default() -> Self {
        Self {
            can_view: true,
            can_react: true,
            can_remove: true,
        }
    }
}

/// Reaction behaviour settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionsConfig {
    /// Allowed targets as `type` or `type:bundle`; empty allows all
    #[serde(default)]
    pub target_entities: Vec<String>,
    #[serde(default)]
    pub after_owner_deletion: AccountDeletionPolicy,
    #[serde(default)]
    pub anonymous: AnonymousAccess,
    #[serde(default = "default_count_cache_ttl")]
    pub count_cache_ttl_secs: u64,
    #[serde(default)]
    pub session_cookie_secure: bool,
    /// Shared secret for admin routes; admin routes are disabled without it
    #[serde(default)]
    pub admin_token: Option<String>,
    #[serde(default = "default_install_defaults")]
    pub install_defaults: bool,
}

impl Default for ReactionsConfig {
    fn default() -> Self {
        Self {
            target_entities: Vec::new(),
            after_owner_deletion: AccountDeletionPolicy::default(),
            anonymous: AnonymousAccess::default(),
            count_cache_ttl_secs: default_count_cache_ttl(),
            session_cookie_secure: false,
            admin_token: None,
            install_defaults: default_install_defaults(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "emoji-reactions".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_count_cache_ttl() -> u64 {
    300
}

fn default_install_defaults() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let redis = match vars.get("REDIS_URL") {
            Some(url) if !url.is_empty() => Some(RedisConfig {
                url,
                max_connections: vars
                    .parse_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            }),
            _ => None,
        };

        let after_owner_deletion = match vars.get("REACTIONS_AFTER_OWNER_DELETION") {
            Some(raw) => AccountDeletionPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidValue("REACTIONS_AFTER_OWNER_DELETION", raw))?,
            None => AccountDeletionPolicy::default(),
        };

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: match vars.get("APP_ENV") {
                    Some(raw) => Environment::parse(&raw)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
                    None => default_env(),
                },
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.require_parsed("API_PORT")?,
            },
            database: DatabaseConfig {
                url: vars.require("DATABASE_URL")?,
                max_connections: vars.parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                migrations_dir: vars
                    .get("REACTIONS_MIGRATIONS_DIR")
                    .unwrap_or_else(default_migrations_dir),
            },
            redis,
            jwt: JwtConfig {
                secret: vars.require("JWT_SECRET")?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars.list("CORS_ALLOWED_ORIGINS"),
            },
            snowflake: SnowflakeConfig {
                worker_id: vars.worker_id()?,
            },
            reactions: ReactionsConfig {
                target_entities: vars.list("REACTIONS_TARGET_ENTITIES"),
                after_owner_deletion,
                anonymous: AnonymousAccess {
                    can_view: vars.parse_or("REACTIONS_ANONYMOUS_CAN_VIEW", || true)?,
                    can_react: vars.parse_or("REACTIONS_ANONYMOUS_CAN_REACT", || true)?,
                    can_remove: vars.parse_or("REACTIONS_ANONYMOUS_CAN_REMOVE", || true)?,
                },
                count_cache_ttl_secs: vars
                    .parse_or("REACTIONS_COUNT_CACHE_TTL", default_count_cache_ttl)?,
                session_cookie_secure: vars.parse_or("REACTIONS_SESSION_COOKIE_SECURE", || false)?,
                admin_token: vars.get("REACTIONS_ADMIN_TOKEN").filter(|t| !t.is_empty()),
                install_defaults: vars
                    .parse_or("REACTIONS_INSTALL_DEFAULTS", default_install_defaults)?,
            },
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).map(|v| v.trim().to_string())
    }

    fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn require_parsed<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let raw = self.require(key)?;
        raw.parse().map_err(|_| ConfigError::InvalidValue(key, raw))
    }

    fn parse_or<T: FromStr>(
        &self,
        key: &'static str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(default()),
        }
    }

    fn worker_id(&self) -> Result<u16, ConfigError> {
        let worker_id: u16 = self.parse_or("WORKER_ID", || 0)?;
        if worker_id > SnowflakeGenerator::MAX_WORKER_ID {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }
        Ok(worker_id)
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("API_PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/reactions"),
        ("JWT_SECRET", "secret"),
    ];

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.app.name, "emoji-reactions");
        assert_eq!(config.api.address(), "127.0.0.1:8080");
        assert!(config.redis.is_none());
        assert_eq!(config.database.migrations_dir, "./migrations");
        assert_eq!(config.reactions.after_owner_deletion, AccountDeletionPolicy::Delete);
        assert_eq!(config.reactions.anonymous, AnonymousAccess::default());
        assert_eq!(config.reactions.count_cache_ttl_secs, 300);
        assert!(config.reactions.target_entities.is_empty());
        assert!(config.reactions.admin_token.is_none());
        assert!(config.reactions.install_defaults);
    }

    #[test]
    fn test_missing_required_var() {
        let err = load(&[("API_PORT", "8080"), ("JWT_SECRET", "s")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_reaction_settings() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("REDIS_URL", "redis://localhost"),
            ("REACTIONS_TARGET_ENTITIES", "node:article, comment ,"),
            ("REACTIONS_AFTER_OWNER_DELETION", "set_to_anonymous"),
            ("REACTIONS_ANONYMOUS_CAN_REMOVE", "false"),
            ("REACTIONS_ADMIN_TOKEN", "admin"),
        ]);
        let config = load(&pairs).unwrap();

        assert_eq!(config.redis.unwrap().max_connections, 10);
        assert_eq!(config.reactions.target_entities, vec!["node:article", "comment"]);
        assert_eq!(
            config.reactions.after_owner_deletion,
            AccountDeletionPolicy::ReassignToAnonymous
        );
        assert!(config.reactions.anonymous.can_react);
        assert!(!config.reactions.anonymous.can_remove);
        assert_eq!(config.reactions.admin_token.as_deref(), Some("admin"));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("REACTIONS_AFTER_OWNER_DELETION", "archive"));
        assert!(matches!(
            load(&pairs).unwrap_err(),
            ConfigError::InvalidValue("REACTIONS_AFTER_OWNER_DELETION", _)
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("REACTIONS_ANONYMOUS_CAN_VIEW", "maybe"));
        assert!(matches!(
            load(&pairs).unwrap_err(),
            ConfigError::InvalidValue("REACTIONS_ANONYMOUS_CAN_VIEW", _)
        ));
    }

    #[test]
    fn test_worker_id_must_fit_snowflake_layout() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("WORKER_ID", "1023"));
        assert_eq!(load(&pairs).unwrap().snowflake.worker_id, 1023);

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("WORKER_ID", "2000"));
        assert!(matches!(
            load(&pairs).unwrap_err(),
            ConfigError::InvalidValue("WORKER_ID", ref raw) if raw == "2000"
        ));
    }

    #[test]
    fn test_environment_flags() {
        assert!(Environment::Production.is_production());
        assert!(Environment::Development.is_development());
        assert_eq!(Environment::parse("STAGING"), Some(Environment::Staging));
    }
}
