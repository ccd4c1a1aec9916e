//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::handlers::{health, reaction_types, reactions, session, targets};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(target_routes())
        .merge(reaction_routes())
        .route("/session", delete(session::clear_anonymous_session))
}

/// Reaction type catalog routes
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reaction-types",
            get(reaction_types::list_reaction_types).post(reaction_types::create_reaction_type),
        )
        .route("/reaction-types/:name", delete(reaction_types::delete_reaction_type))
}

/// Host lifecycle routes (admin)
fn target_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/targets/:target_type/:target_id",
            put(targets::register_target).delete(targets::purge_target),
        )
        .route(
            "/accounts/:account_id/reactions",
            delete(targets::release_account),
        )
}

/// Viewer reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/targets/:target_type/:target_id/reactions",
            get(reactions::get_summary),
        )
        .route(
            "/targets/:target_type/:target_id/reactions/@me",
            get(reactions::get_current_reaction),
        )
        .route(
            "/targets/:target_type/:target_id/reactions/:reaction_type/@me",
            put(reactions::react).delete(reactions::remove_reaction),
        )
}
