//! Path parameter extractors
//!
//! Typed path parameters. Validation of the values happens in the accessors
//! so handlers get a domain error with a stable code.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use reactions_core::{Snowflake, TargetRef};
use serde::{de::DeserializeOwned, Deserialize};

use crate::response::{ApiError, ApiResult};

/// `Path` with rejections rendered as [`ApiError`]
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ApiPath(inner))
    }
}

/// `/targets/:target_type/:target_id`
#[derive(Debug, Deserialize)]
pub struct TargetPath {
    pub target_type: String,
    pub target_id: String,
}

impl TargetPath {
    pub fn target(&self) -> ApiResult<TargetRef> {
        Ok(TargetRef::new(&self.target_type, &self.target_id)?)
    }
}

/// `/targets/:target_type/:target_id/reactions/:reaction_type/@me`
#[derive(Debug, Deserialize)]
pub struct TargetReactionPath {
    pub target_type: String,
    pub target_id: String,
    pub reaction_type: String,
}

impl TargetReactionPath {
    pub fn target(&self) -> ApiResult<TargetRef> {
        Ok(TargetRef::new(&self.target_type, &self.target_id)?)
    }

    pub fn reaction_type(&self) -> &str {
        &self.reaction_type
    }
}

/// `/reaction-types/:name`
#[derive(Debug, Deserialize)]
pub struct ReactionTypePath {
    pub name: String,
}

/// `/accounts/:account_id/reactions`
#[derive(Debug, Deserialize)]
pub struct AccountPath {
    pub account_id: String,
}

impl AccountPath {
    pub fn account_id(&self) -> ApiResult<Snowflake> {
        self.account_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid account_id format"))
    }
}
