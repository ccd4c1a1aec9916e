//! Authentication extractor
//!
//! Reads the host-issued JWT from the Authorization header. A missing header
//! means an anonymous visitor; a present but invalid token is rejected.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use reactions_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated account extracted from the JWT
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub account_id: Snowflake,
}

/// Optional authenticated account
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn account_id(&self) -> Option<Snowflake> {
        self.0.map(|user| user.account_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Ok(OptionalAuthUser(None));
        };

        let app_state = AppState::from_ref(state);
        let account_id = app_state
            .jwt_service()
            .verify(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        Ok(OptionalAuthUser(Some(AuthUser { account_id })))
    }
}
