//! Admin extractor
//!
//! Admin routes are called by the host CMS with a shared secret in the
//! `x-admin-token` header. Without a configured token they are disabled.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use reactions_service::ServiceError;

use crate::response::ApiError;
use crate::state::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Marker for a request carrying the configured admin token
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let Some(expected) = app_state.config().reactions.admin_token.as_deref() else {
            return Err(ServiceError::permission_denied("admin").into());
        };

        let provided = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingAdminToken)?;

        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            tracing::warn!("Rejected admin request with wrong token");
            return Err(ServiceError::permission_denied("admin").into());
        }

        Ok(AdminAuth)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
