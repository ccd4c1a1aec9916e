//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, JWT verification and the backing pools probed by readiness.

use std::sync::Arc;

use reactions_cache::RedisPool;
use reactions_common::{AppConfig, JwtService};
use reactions_db::PgPool;
use reactions_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    jwt_service: Arc<JwtService>,
    /// None when running over the in-memory store
    pool: Option<PgPool>,
    /// None when Redis is not configured
    redis_pool: Option<RedisPool>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let jwt_service = Arc::new(JwtService::new(&config.jwt.secret));
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            jwt_service,
            pool: None,
            redis_pool: None,
        }
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn with_redis(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("postgres", &self.pool.is_some())
            .field("redis", &self.redis_pool.is_some())
            .finish_non_exhaustive()
    }
}
