//! Anonymous session handlers

use axum_extra::extract::cookie::CookieJar;

use crate::extractors::clear_session;
use crate::response::NoContent;

/// Forget the anonymous session. Reactions made under it stay counted.
///
/// DELETE /session
pub async fn clear_anonymous_session(jar: CookieJar) -> (CookieJar, NoContent) {
    (clear_session(jar), NoContent)
}
