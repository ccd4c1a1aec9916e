//! Viewer identity - who a reaction belongs to
//!
//! A viewer is either an authenticated account or an anonymous visitor carrying
//! a session token in a cookie. In storage the key is split into an account id
//! column (0 for anonymous viewers) and a session token column (empty for accounts).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::Snowflake;

const TOKEN_LEN: usize = 32;
const PLACEHOLDER_PREFIX: &str = "deleted-";

/// Opaque token identifying an anonymous visitor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh random token (32 lowercase hex chars)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Parse a token presented by a client. Anything that is not 32 lowercase
    /// hex chars is rejected, including placeholder tokens.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == TOKEN_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| Self(raw.to_string()))
    }

    /// Rebuild a token read back from storage without validation
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Owner of reactions released by a deleted account. Such tokens can never be
    /// presented by a client, so the rows stay counted but unreachable.
    pub fn placeholder_for(account_id: Snowflake) -> Self {
        Self(format!("{PLACEHOLDER_PREFIX}{account_id}"))
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.starts_with(PLACEHOLDER_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity a reaction is recorded under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewerKey {
    Account(Snowflake),
    Anonymous(SessionToken),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewerKeyParseError {
    #[error("viewer key must start with 'user:' or 'anon:'")]
    UnknownPrefix,
    #[error("invalid account id in viewer key")]
    InvalidAccount,
    #[error("empty session token in viewer key")]
    EmptyToken,
}

impl ViewerKey {
    /// Account id column value (0 for anonymous viewers)
    pub fn account_id(&self) -> i64 {
        match self {
            Self::Account(id) => id.into_inner(),
            Self::Anonymous(_) => 0,
        }
    }

    /// Session token column value (empty for accounts)
    pub fn session_token(&self) -> &str {
        match self {
            Self::Account(_) => "",
            Self::Anonymous(token) => token.as_str(),
        }
    }

    /// Rebuild from the two storage columns
    pub fn from_columns(account_id: i64, session_token: &str) -> Self {
        if account_id == 0 {
            Self::Anonymous(SessionToken::from_stored(session_token))
        } else {
            Self::Account(Snowflake::new(account_id))
        }
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }

    pub fn parse(s: &str) -> Result<Self, ViewerKeyParseError> {
        if let Some(id) = s.strip_prefix("user:") {
            let id = Snowflake::parse(id).map_err(|_| ViewerKeyParseError::InvalidAccount)?;
            if id.is_zero() {
                return Err(ViewerKeyParseError::InvalidAccount);
            }
            Ok(Self::Account(id))
        } else if let Some(token) = s.strip_prefix("anon:") {
            if token.is_empty() {
                return Err(ViewerKeyParseError::EmptyToken);
            }
            Ok(Self::Anonymous(SessionToken::from_stored(token)))
        } else {
            Err(ViewerKeyParseError::UnknownPrefix)
        }
    }
}

impl fmt::Display for ViewerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(id) => write!(f, "user:{id}"),
            Self::Anonymous(token) => write!(f, "anon:{token}"),
        }
    }
}

impl Serialize for ViewerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ViewerKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ViewerKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}
