//! Viewer extractor
//!
//! Combines the optional JWT account with the anonymous session cookie.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use reactions_core::{SessionToken, Snowflake, ViewerKey};
use reactions_service::{IdentityResolver, SESSION_COOKIE_MAX_AGE_SECS, SESSION_COOKIE_NAME};
use time::Duration;

use super::auth::OptionalAuthUser;
use crate::response::ApiError;
use crate::state::AppState;

/// Request viewer: an account, an anonymous session, or nobody yet
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub account: Option<Snowflake>,
    pub jar: CookieJar,
}

impl ViewerContext {
    pub fn is_anonymous(&self) -> bool {
        self.account.is_none()
    }

    fn session_cookie(&self) -> Option<&str> {
        self.jar.get(SESSION_COOKIE_NAME).map(Cookie::value)
    }

    /// Viewer without minting a session
    pub fn existing(&self) -> Option<ViewerKey> {
        IdentityResolver::existing(self.account, self.session_cookie())
    }

    /// Viewer, minting an anonymous session when needed. The returned jar
    /// carries the new cookie and must be part of the response.
    pub fn resolve(self, secure: bool) -> (ViewerKey, CookieJar) {
        let resolved = IdentityResolver::resolve(self.account, self.session_cookie());
        let jar = match resolved.issued_session {
            Some(token) => self.jar.add(session_cookie(&token, secure)),
            None => self.jar,
        };
        (resolved.viewer, jar)
    }
}

/// Cookie carrying a freshly minted session token
pub fn session_cookie(token: &SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .path("/")
        .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE_SECS))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Removal cookie for the anonymous session
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"))
}

#[async_trait]
impl<S> FromRequestParts<S> for ViewerContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = OptionalAuthUser::from_request_parts(parts, state).await?;
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        Ok(ViewerContext {
            account: auth.account_id(),
            jar,
        })
    }
}
