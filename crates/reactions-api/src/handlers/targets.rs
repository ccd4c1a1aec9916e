//! Host lifecycle handlers
//!
//! Called by the host CMS when content is published, updated or deleted and
//! when an account is deleted.

use axum::extract::State;
use reactions_service::dto::{
    AccountReleaseResponse, PurgeResponse, RegisterTargetRequest, TargetResponse,
};
use reactions_service::{ReactionService, TargetService};

use crate::extractors::{AccountPath, AdminAuth, ApiPath, TargetPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Register a target, or refresh its title and bundle
///
/// PUT /targets/{target_type}/{target_id}
pub async fn register_target(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ApiPath(path): ApiPath<TargetPath>,
    ValidatedJson(request): ValidatedJson<RegisterTargetRequest>,
) -> ApiResult<ApiJson<TargetResponse>> {
    let target = path.target()?;
    let service = TargetService::new(state.service_context());
    let entry = service.register(target, request).await?;
    Ok(ApiJson(TargetResponse::from(&entry)))
}

/// Content deleted: drop the target and all its reactions
///
/// DELETE /targets/{target_type}/{target_id}
pub async fn purge_target(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ApiPath(path): ApiPath<TargetPath>,
) -> ApiResult<ApiJson<PurgeResponse>> {
    let target = path.target()?;
    let service = ReactionService::new(state.service_context());
    let removed = service.purge_target(&target).await?;

    Ok(ApiJson(PurgeResponse {
        target_type: target.target_type,
        target_id: target.target_id,
        removed,
    }))
}

/// Account deleted: apply the configured deletion policy
///
/// DELETE /accounts/{account_id}/reactions
pub async fn release_account(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ApiPath(path): ApiPath<AccountPath>,
) -> ApiResult<ApiJson<AccountReleaseResponse>> {
    let account_id = path.account_id()?;
    let service = ReactionService::new(state.service_context());
    let (policy, affected) = service.release_account(account_id).await?;

    Ok(ApiJson(AccountReleaseResponse {
        account_id: account_id.to_string(),
        policy: policy.as_str().to_string(),
        affected,
    }))
}
