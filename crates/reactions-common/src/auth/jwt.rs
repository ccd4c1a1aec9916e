//! JWT validation for viewers signed in on the host site
//!
//! The host issues HS256 access tokens whose subject is the account id.
//! This service only needs to verify them; `issue` exists for tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use reactions_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Get the account id as a Snowflake
    ///
    /// # Errors
    /// Returns an error if the subject is not a positive integer
    pub fn account_id(&self) -> Result<Snowflake, AppError> {
        match Snowflake::parse(&self.sub) {
            Ok(id) if id.into_inner() > 0 => Ok(id),
            _ => Err(AppError::InvalidToken),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for an account, valid for `ttl_secs`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, account_id: Snowflake, ttl_secs: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Decode and validate a token, returning the account id it was issued for
    ///
    /// # Errors
    /// Returns `TokenExpired` or `InvalidToken`
    pub fn verify(&self, token: &str) -> Result<Snowflake, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            },
        )?;

        data.claims.account_id()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService").finish_non_exhaustive()
    }
}
