//! Identity resolver
//!
//! Maps a request context (authenticated account, or an anonymous session
//! cookie) to the [`ViewerKey`] reactions are recorded under.

use reactions_core::{SessionToken, Snowflake, ViewerKey};

/// Name of the anonymous session cookie
pub const SESSION_COOKIE_NAME: &str = "reactions_session";

/// Lifetime of the anonymous session cookie (7 days)
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Outcome of [`IdentityResolver::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub viewer: ViewerKey,
    /// Set when a fresh anonymous token was minted; the caller must send it
    /// back as the session cookie.
    pub issued_session: Option<SessionToken>,
}

/// Stateless: there is no server-side session table.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl IdentityResolver {
    /// Resolve the viewer, minting an anonymous token when needed. Never fails.
    ///
    /// A malformed cookie is treated as absent.
    pub fn resolve(account: Option<Snowflake>, cookie: Option<&str>) -> ResolvedIdentity {
        if let Some(viewer) = Self::existing(account, cookie) {
            return ResolvedIdentity {
                viewer,
                issued_session: None,
            };
        }

        let token = SessionToken::generate();
        tracing::debug!("Minted anonymous session token");
        ResolvedIdentity {
            viewer: ViewerKey::Anonymous(token.clone()),
            issued_session: Some(token),
        }
    }

    /// Resolve the viewer without minting. Reads and removals use this, so a
    /// visitor who never reacted never receives a cookie.
    pub fn existing(account: Option<Snowflake>, cookie: Option<&str>) -> Option<ViewerKey> {
        if let Some(account_id) = account {
            return Some(ViewerKey::Account(account_id));
        }
        cookie
            .and_then(SessionToken::parse)
            .map(ViewerKey::Anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_wins_over_cookie() {
        let token = SessionToken::generate();
        let resolved = IdentityResolver::resolve(Some(Snowflake::new(42)), Some(token.as_str()));
        assert_eq!(resolved.viewer, ViewerKey::Account(Snowflake::new(42)));
        assert_eq!(resolved.viewer.to_string(), "user:42");
        assert!(resolved.issued_session.is_none());
    }

    #[test]
    fn test_anonymous_without_cookie_mints_token() {
        let resolved = IdentityResolver::resolve(None, None);
        let issued = resolved.issued_session.expect("token should be minted");
        assert_eq!(resolved.viewer, ViewerKey::Anonymous(issued.clone()));
        assert_eq!(resolved.viewer.to_string(), format!("anon:{issued}"));
    }

    #[test]
    fn test_reused_cookie_resolves_to_same_viewer() {
        let first = IdentityResolver::resolve(None, None);
        let token = first.issued_session.unwrap();

        let second = IdentityResolver::resolve(None, Some(token.as_str()));
        assert_eq!(second.viewer, first.viewer);
        assert!(second.issued_session.is_none());
    }

    #[test]
    fn test_malformed_cookie_is_ignored() {
        assert!(IdentityResolver::existing(None, Some("not-a-token")).is_none());
        assert!(IdentityResolver::existing(None, Some("deleted-42")).is_none());

        let resolved = IdentityResolver::resolve(None, Some("garbage"));
        assert!(resolved.issued_session.is_some());
    }

    #[test]
    fn test_existing_never_mints() {
        assert!(IdentityResolver::existing(None, None).is_none());
        assert_eq!(
            IdentityResolver::existing(Some(Snowflake::new(7)), None),
            Some(ViewerKey::Account(Snowflake::new(7)))
        );
    }

    #[test]
    fn test_cookie_lifetime_is_seven_days() {
        assert_eq!(SESSION_COOKIE_MAX_AGE_SECS, 604_800);
    }
}
