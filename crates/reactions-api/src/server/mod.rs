//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reactions_cache::{PubSubReactionListener, Publisher, RedisCountCache, RedisPool};
use reactions_common::{AppConfig, AppError};
use reactions_core::SnowflakeGenerator;
use reactions_db::{
    create_pool, run_migrations, MemoryStore, PgReactionRepository, PgReactionTypeRepository,
    PgTargetRepository,
};
use reactions_service::{CatalogService, ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(health.merge(api).with_state(state))
}

/// Initialize PostgreSQL, optional Redis and the service context
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = reactions_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool, &config.database.migrations_dir)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let mut builder = ServiceContextBuilder::new()
        .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
        .reaction_type_repo(Arc::new(PgReactionTypeRepository::new(pool.clone())))
        .target_repo(Arc::new(PgTargetRepository::new(pool.clone())))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .settings(config.reactions.clone());

    let redis_pool = match &config.redis {
        Some(redis_config) => {
            info!("Connecting to Redis...");
            let redis_pool =
                RedisPool::from_config(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
            builder = builder
                .count_cache(Arc::new(RedisCountCache::new(
                    redis_pool.clone(),
                    config.reactions.count_cache_ttl_secs,
                )))
                .listener(Arc::new(PubSubReactionListener::new(Publisher::new(
                    redis_pool.clone(),
                ))));
            info!("Redis count cache and event publishing enabled");
            Some(redis_pool)
        }
        None => {
            info!("REDIS_URL not set, count cache and event publishing disabled");
            None
        }
    };

    let service_context = builder.build().map_err(AppError::from)?;
    install_defaults(&service_context, &config).await?;

    let mut state = AppState::new(service_context, config).with_pool(pool);
    if let Some(redis_pool) = redis_pool {
        state = state.with_redis(redis_pool);
    }
    Ok(state)
}

/// App state over the in-process store, for local runs and tests
pub async fn create_memory_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let store = MemoryStore::new();
    let service_context = ServiceContextBuilder::new()
        .reaction_repo(store.reactions())
        .reaction_type_repo(store.reaction_types())
        .target_repo(store.targets())
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .settings(config.reactions.clone())
        .build()
        .map_err(AppError::from)?;

    install_defaults(&service_context, &config).await?;
    Ok(AppState::new(service_context, config))
}

async fn install_defaults(ctx: &ServiceContext, config: &AppConfig) -> Result<(), AppError> {
    if !config.reactions.install_defaults {
        return Ok(());
    }
    let created = CatalogService::new(ctx).install_defaults().await?;
    info!(created, "Reaction type catalog checked");
    Ok(())
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = format!("{}:{}", config.api.host, config.api.port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
