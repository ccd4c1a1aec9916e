//! API Integration Tests
//!
//! Most tests run against the in-memory store and need no services.
//! `test_postgres_*` tests additionally require:
//! - Running PostgreSQL instance (and optionally Redis)
//! - Environment variables: DATABASE_URL (REDIS_URL optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    account_token, assert_error, assert_json, assert_status, check_test_env, fixtures::*,
    session_set_cookie, session_token, As, TestServer,
};
use reqwest::{Method, StatusCode};

const TITLE: &str = "Hello world";

async fn server_with_target(target_id: &str) -> TestServer {
    let server = TestServer::start().await.expect("Failed to start server");
    server
        .register_target("node", target_id, TITLE)
        .await
        .expect("Failed to register target");
    server
}

fn reactions_path(target_id: &str) -> String {
    format!("/targets/node/{target_id}/reactions")
}

fn react_path(target_id: &str, reaction_type: &str) -> String {
    format!("/targets/node/{target_id}/reactions/{reaction_type}/@me")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health", &As::Nobody).await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_without_redis() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready", &As::Nobody).await.unwrap();
    let body: ReadinessBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.status, "ready");
    assert_eq!(body.checks.database, "healthy");
    assert_eq!(body.checks.redis, "disabled");
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_default_catalog_installed() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/reaction-types", &As::Nobody).await.unwrap();
    let types: Vec<ReactionTypeBody> = assert_json(response, StatusCode::OK).await.unwrap();

    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["like", "love", "yay", "haha", "wow", "sad", "angry"]);
}

#[tokio::test]
async fn test_catalog_can_start_empty() {
    let server = TestServer::start_with(&[("REACTIONS_INSTALL_DEFAULTS", "false")])
        .await
        .unwrap();
    let response = server.get("/reaction-types", &As::Nobody).await.unwrap();
    let types: Vec<ReactionTypeBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(types.is_empty());
}

#[tokio::test]
async fn test_admin_creates_and_deletes_reaction_type() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let response = server
        .admin_post("/reaction-types", &CreateReactionType::named("clap"))
        .await
        .unwrap();
    let created: ReactionTypeBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.name, "clap");
    assert_eq!(created.icon_ref, "clap");
    assert!(!created.uses_animated_icon);
    // Appended after the defaults
    assert_eq!(created.display_weight, 7);

    let response = server.put(&react_path(&target_id, "clap"), &As::Nobody).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .admin_post("/reaction-types", &CreateReactionType::named("clap"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "REACTION_TYPE_EXISTS");

    let response = server.admin_delete("/reaction-types/clap").await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.admin_delete("/reaction-types/clap").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.put(&react_path(&target_id, "clap"), &As::Nobody).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "UNKNOWN_REACTION_TYPE");
}

#[tokio::test]
async fn test_create_reaction_type_rejects_bad_names() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .admin_post("/reaction-types", &CreateReactionType::named("Bad Name"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .admin_post("/reaction-types", &CreateReactionType::named("far-too-long-name"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Admin Access Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_token() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .with_admin_token(Method::DELETE, "/reaction-types/like", None)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_ADMIN_TOKEN");

    let response = server
        .with_admin_token(Method::DELETE, "/reaction-types/like", Some("wrong"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "MISSING_PERMISSIONS");

    // Still in the catalog
    let response = server.get("/reaction-types", &As::Nobody).await.unwrap();
    let types: Vec<ReactionTypeBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(types.iter().any(|t| t.name == "like"));
}

#[tokio::test]
async fn test_admin_routes_disabled_without_configured_token() {
    let server = TestServer::start_with(&[("REACTIONS_ADMIN_TOKEN", "")])
        .await
        .unwrap();

    let response = server.admin_delete("/reaction-types/like").await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Anonymous Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_first_anonymous_reaction_mints_session() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let response = server.put(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();
    let set_cookie = session_set_cookie(&response).expect("session cookie should be set");
    assert!(set_cookie.contains("Max-Age=604800"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(!set_cookie.contains("Secure"));

    let body: ReactBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.outcome, "created");
    assert_eq!(body.reaction.reaction_type, "like");
    assert_eq!(body.reaction.target_type, "node");
    assert_eq!(body.reaction.target_id, target_id);
    assert_eq!(body.counts, vec![CountBody::of("like", 1)]);
    assert_eq!(body.total, 1);
    assert_eq!(body.message, format!("You reacted \"like\" on \"{TITLE}\""));
}

#[tokio::test]
async fn test_session_cookie_reuse_updates_in_place() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let response = server.put(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();
    let token = session_token(&response).expect("session cookie should be set");
    let first: ReactBody = assert_json(response, StatusCode::OK).await.unwrap();
    let viewer = As::Session(token);

    let response = server.put(&react_path(&target_id, "love"), &viewer).await.unwrap();
    assert!(session_set_cookie(&response).is_none());
    let second: ReactBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(second.outcome, "updated");
    assert_eq!(second.previous_type.as_deref(), Some("like"));
    assert_eq!(second.reaction.id, first.reaction.id);
    assert_eq!(second.counts, vec![CountBody::of("love", 1)]);
    assert_eq!(second.total, 1);

    let response = server.put(&react_path(&target_id, "love"), &viewer).await.unwrap();
    let third: ReactBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(third.outcome, "unchanged");
    assert_eq!(third.total, 1);
}

#[tokio::test]
async fn test_secure_cookie_when_configured() {
    let target_id = unique_target_id();
    let server = TestServer::start_with(&[("REACTIONS_SESSION_COOKIE_SECURE", "true")])
        .await
        .unwrap();
    server.register_target("node", &target_id, TITLE).await.unwrap();

    let response = server.put(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();
    let set_cookie = session_set_cookie(&response).unwrap();
    assert!(set_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_reads_never_mint_session() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let response = server.get(&reactions_path(&target_id), &As::Nobody).await.unwrap();
    assert!(session_set_cookie(&response).is_none());
    let summary: SummaryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.total, 0);
    assert!(summary.counts.is_empty());
    assert!(summary.viewer_reaction.is_none());

    let path = format!("{}/@me", reactions_path(&target_id));
    let response = server.get(&path, &As::Nobody).await.unwrap();
    assert!(session_set_cookie(&response).is_none());
    let current: Option<ReactionBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(current.is_none());

    let response = server.delete(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();
    assert!(session_set_cookie(&response).is_none());
    let removed: RemoveBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!removed.removed);
}

#[tokio::test]
async fn test_summary_reports_viewer_reaction() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let response = server.put(&react_path(&target_id, "wow"), &As::Nobody).await.unwrap();
    let token = session_token(&response).unwrap();
    server.put(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();

    let viewer = As::Session(token);
    let response = server.get(&reactions_path(&target_id), &viewer).await.unwrap();
    let summary: SummaryBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(summary.target_type, "node");
    assert_eq!(summary.target_id, target_id);
    // Catalog order, not insertion order
    assert_eq!(
        summary.counts,
        vec![CountBody::of("like", 1), CountBody::of("wow", 1)]
    );
    assert_eq!(summary.total, 2);
    assert_eq!(summary.viewer_reaction.as_deref(), Some("wow"));

    let path = format!("{}/@me", reactions_path(&target_id));
    let response = server.get(&path, &viewer).await.unwrap();
    let current: Option<ReactionBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(current.unwrap().reaction_type, "wow");
}

#[tokio::test]
async fn test_remove_requires_matching_type() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let response = server.put(&react_path(&target_id, "sad"), &As::Nobody).await.unwrap();
    let viewer = As::Session(session_token(&response).unwrap());

    let response = server.delete(&react_path(&target_id, "like"), &viewer).await.unwrap();
    let body: RemoveBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.removed);
    assert!(body.message.is_none());
    assert_eq!(body.total, 1);

    let response = server.delete(&react_path(&target_id, "sad"), &viewer).await.unwrap();
    let body: RemoveBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.removed);
    assert_eq!(body.reaction.unwrap().reaction_type, "sad");
    assert!(body.counts.is_empty());
    assert_eq!(body.total, 0);
    assert_eq!(body.message.as_deref(), Some("Reaction removed on \"Hello world\""));

    let response = server.delete(&react_path(&target_id, "sad"), &viewer).await.unwrap();
    let body: RemoveBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.removed);
}

#[tokio::test]
async fn test_clear_session_cookie() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .delete("/session", &As::Session("0123456789abcdef0123456789abcdef".into()))
        .await
        .unwrap();

    let set_cookie = session_set_cookie(&response).expect("removal cookie should be set");
    assert!(set_cookie.contains("Max-Age=0"));
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Account Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_accounts_react_without_cookie() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;
    let alice = As::Account(account_token(1001).unwrap());
    let bob = As::Account(account_token(1002).unwrap());

    let response = server.put(&react_path(&target_id, "like"), &alice).await.unwrap();
    assert!(session_set_cookie(&response).is_none());
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.put(&react_path(&target_id, "like"), &bob).await.unwrap();
    let body: ReactBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.outcome, "created");
    assert_eq!(body.counts, vec![CountBody::of("like", 2)]);
    assert_eq!(body.total, 2);
}

#[tokio::test]
async fn test_invalid_bearer_token_rejected() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let response = server
        .put(&react_path(&target_id, "like"), &As::Account("not.a.jwt".into()))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

// ============================================================================
// Validation and Policy Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_reaction_type() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let response = server.put(&react_path(&target_id, "meh"), &As::Nobody).await.unwrap();
    assert!(session_set_cookie(&response).is_none());
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "UNKNOWN_REACTION_TYPE");
}

#[tokio::test]
async fn test_unregistered_target() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .put(&react_path("missing", "like"), &As::Nobody)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "TARGET_NOT_FOUND");

    let response = server.get(&reactions_path("missing"), &As::Nobody).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_target_allow_list() {
    let server = TestServer::start_with(&[("REACTIONS_TARGET_ENTITIES", "node:article")])
        .await
        .unwrap();
    server
        .register_target_in("node", "1", "An article", Some("article"))
        .await
        .unwrap();
    server
        .register_target_in("node", "2", "A page", Some("page"))
        .await
        .unwrap();

    let response = server.put(&react_path("1", "like"), &As::Nobody).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.put(&react_path("2", "like"), &As::Nobody).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "TARGET_NOT_REACTABLE");
}

#[tokio::test]
async fn test_anonymous_access_settings() {
    let target_id = unique_target_id();
    let server = TestServer::start_with(&[("REACTIONS_ANONYMOUS_CAN_REACT", "false")])
        .await
        .unwrap();
    server.register_target("node", &target_id, TITLE).await.unwrap();

    let response = server.put(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();
    assert!(session_set_cookie(&response).is_none());
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "MISSING_PERMISSIONS");

    // Viewing is still allowed
    let response = server.get(&reactions_path(&target_id), &As::Nobody).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let account = As::Account(account_token(77).unwrap());
    let response = server.put(&react_path(&target_id, "like"), &account).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_invalid_target_type_in_path() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .get("/targets/Not%20Valid/1/reactions", &As::Nobody)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_TARGET");
}

// ============================================================================
// Host Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_register_refreshes_title() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    let body = serde_json::json!({ "title": "Renamed", "bundle": "article" });
    let response = server
        .admin_put(&format!("/targets/node/{target_id}"), &body)
        .await
        .unwrap();
    let target: TargetBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(target.title, "Renamed");
    assert_eq!(target.bundle.as_deref(), Some("article"));

    let response = server.put(&react_path(&target_id, "haha"), &As::Nobody).await.unwrap();
    let react: ReactBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(react.message, "You reacted \"haha\" on \"Renamed\"");
}

#[tokio::test]
async fn test_purge_target_removes_reactions() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;

    server.put(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();
    server.put(&react_path(&target_id, "love"), &As::Nobody).await.unwrap();

    let response = server
        .admin_delete(&format!("/targets/node/{target_id}"))
        .await
        .unwrap();
    let body: PurgeBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.removed, 2);

    let response = server.get(&reactions_path(&target_id), &As::Nobody).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Purging again is a no-op
    let response = server
        .admin_delete(&format!("/targets/node/{target_id}"))
        .await
        .unwrap();
    let body: PurgeBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.removed, 0);
}

#[tokio::test]
async fn test_release_account_deletes_by_default() {
    let target_id = unique_target_id();
    let server = server_with_target(&target_id).await;
    let account = As::Account(account_token(501).unwrap());

    server.put(&react_path(&target_id, "like"), &account).await.unwrap();
    server.put(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();

    let response = server.admin_delete("/accounts/501/reactions").await.unwrap();
    let body: AccountReleaseBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.account_id, "501");
    assert_eq!(body.policy, "delete");
    assert_eq!(body.affected, 1);

    let response = server.get(&reactions_path(&target_id), &account).await.unwrap();
    let summary: SummaryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.total, 1);
    assert!(summary.viewer_reaction.is_none());
}

#[tokio::test]
async fn test_release_account_reassigns_when_configured() {
    let target_id = unique_target_id();
    let server = TestServer::start_with(&[("REACTIONS_AFTER_OWNER_DELETION", "set_to_anonymous")])
        .await
        .unwrap();
    server.register_target("node", &target_id, TITLE).await.unwrap();
    let account = As::Account(account_token(502).unwrap());

    server.put(&react_path(&target_id, "love"), &account).await.unwrap();

    let response = server.admin_delete("/accounts/502/reactions").await.unwrap();
    let body: AccountReleaseBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.policy, "set_to_anonymous");
    assert_eq!(body.affected, 1);

    // The reaction still counts but no longer belongs to the account
    let response = server.get(&reactions_path(&target_id), &account).await.unwrap();
    let summary: SummaryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.counts, vec![CountBody::of("love", 1)]);
    assert!(summary.viewer_reaction.is_none());
}

#[tokio::test]
async fn test_release_account_rejects_bad_id() {
    let server = TestServer::start().await.unwrap();
    let response = server.admin_delete("/accounts/abc/reactions").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// PostgreSQL Tests
// ============================================================================

#[tokio::test]
async fn test_postgres_react_round_trip() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_postgres().await.expect("Failed to start server");
    let target_id = unique_target_id();
    server.register_target("node", &target_id, TITLE).await.unwrap();

    let response = server.put(&react_path(&target_id, "like"), &As::Nobody).await.unwrap();
    let viewer = As::Session(session_token(&response).unwrap());
    let created: ReactBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(created.outcome, "created");

    let response = server.put(&react_path(&target_id, "yay"), &viewer).await.unwrap();
    let updated: ReactBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.outcome, "updated");
    assert_eq!(updated.reaction.id, created.reaction.id);
    assert_eq!(updated.counts, vec![CountBody::of("yay", 1)]);

    let response = server
        .admin_delete(&format!("/targets/node/{target_id}"))
        .await
        .unwrap();
    let purged: PurgeBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(purged.removed, 1);
}
