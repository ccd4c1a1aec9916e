//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests as
//! different viewers, and reading the anonymous session cookie.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reactions_api::{create_app, create_app_state, create_memory_app_state, AppState};
use reactions_common::{AppConfig, JwtService};
use reactions_core::Snowflake;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_ADMIN_TOKEN: &str = "integration-admin-token";
pub const SESSION_COOKIE: &str = "reactions_session";

/// Who a request is sent as
#[derive(Debug, Clone)]
pub enum As {
    /// No cookie, no token
    Nobody,
    /// Anonymous visitor carrying a session cookie
    Session(String),
    /// Signed-in account with a bearer token
    Account(String),
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over the in-memory store with the default test config
    pub async fn start() -> Result<Self> {
        Self::start_with(&[]).await
    }

    /// Start a server over the in-memory store with config overrides
    pub async fn start_with(overrides: &[(&str, &str)]) -> Result<Self> {
        let config = test_config(overrides)?;
        let state = create_memory_app_state(config).await?;
        Self::serve(state).await
    }

    /// Start a server over PostgreSQL (and Redis, if `REDIS_URL` is set)
    pub async fn start_postgres() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = AppConfig::from_lookup(|key| match key {
            "API_PORT" => Some("0".to_string()),
            "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
            "REACTIONS_ADMIN_TOKEN" => Some(TEST_ADMIN_TOKEN.to_string()),
            "RATE_LIMIT_REQUESTS_PER_SECOND" => Some("1000".to_string()),
            "RATE_LIMIT_BURST" => Some("10000".to_string()),
            other => std::env::var(other).ok(),
        })?;
        let state = create_app_state(config).await?;
        Self::serve(state).await
    }

    async fn serve(state: AppState) -> Result<Self> {
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    fn request(&self, method: Method, path: &str, viewer: &As) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url(), path));
        match viewer {
            As::Nobody => builder,
            As::Session(token) => builder.header(header::COOKIE, format!("{SESSION_COOKIE}={token}")),
            As::Account(jwt) => builder.bearer_auth(jwt),
        }
    }

    fn admin(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path, &As::Nobody)
            .header("x-admin-token", TEST_ADMIN_TOKEN)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, viewer: &As) -> Result<Response> {
        Ok(self.request(Method::GET, path, viewer).send().await?)
    }

    /// Make a PUT request without a body
    pub async fn put(&self, path: &str, viewer: &As) -> Result<Response> {
        Ok(self.request(Method::PUT, path, viewer).send().await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str, viewer: &As) -> Result<Response> {
        Ok(self.request(Method::DELETE, path, viewer).send().await?)
    }

    /// Admin PUT with JSON body
    pub async fn admin_put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.admin(Method::PUT, path).json(body).send().await?)
    }

    /// Admin POST with JSON body
    pub async fn admin_post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.admin(Method::POST, path).json(body).send().await?)
    }

    /// Admin DELETE
    pub async fn admin_delete(&self, path: &str) -> Result<Response> {
        Ok(self.admin(Method::DELETE, path).send().await?)
    }

    /// Send a request with an arbitrary admin token header
    pub async fn with_admin_token(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<Response> {
        let mut builder = self.request(method, path, &As::Nobody);
        if let Some(token) = token {
            builder = builder.header("x-admin-token", token);
        }
        Ok(builder.send().await?)
    }

    /// Register a target through the admin route
    pub async fn register_target(&self, target_type: &str, target_id: &str, title: &str) -> Result<()> {
        self.register_target_in(target_type, target_id, title, None).await
    }

    pub async fn register_target_in(
        &self,
        target_type: &str,
        target_id: &str,
        title: &str,
        bundle: Option<&str>,
    ) -> Result<()> {
        let body = serde_json::json!({ "title": title, "bundle": bundle });
        let response = self
            .admin_put(&format!("/targets/{target_type}/{target_id}"), &body)
            .await?;
        assert_status(response, StatusCode::OK).await
    }
}

/// Test configuration: in-process defaults plus `overrides`
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<String, String> = [
        ("API_PORT", "0"),
        ("DATABASE_URL", "postgres://unused/reactions"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("REACTIONS_ADMIN_TOKEN", TEST_ADMIN_TOKEN),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "10000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Bearer token for an account, signed with the test secret
pub fn account_token(account_id: i64) -> Result<String> {
    Ok(JwtService::new(TEST_JWT_SECRET).issue(Snowflake::new(account_id), 3600)?)
}

/// Raw `Set-Cookie` header for the session cookie, if the response set one
pub fn session_set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
        .map(str::to_string)
}

/// Session token value from the response's `Set-Cookie`, if any
pub fn session_token(response: &Response) -> Option<String> {
    let raw = session_set_cookie(response)?;
    let value = raw
        .split(';')
        .next()?
        .strip_prefix(&format!("{SESSION_COOKIE}="))?;
    Some(value.to_string())
}

/// Helper to check if the PostgreSQL test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: crate::fixtures::ErrorBody = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}
