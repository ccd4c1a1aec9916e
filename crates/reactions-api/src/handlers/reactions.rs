//! Reaction handlers
//!
//! Endpoints a viewer uses to read, set and clear their reaction on a target.

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use reactions_core::ViewerKey;
use reactions_service::dto::{
    ReactResponse, ReactionResponse, ReactionSummaryResponse, RemoveResponse,
};
use reactions_service::{AggregationService, IdentityResolver, ReactionService};

use crate::extractors::{ApiPath, TargetPath, TargetReactionPath, ViewerContext};
use crate::policy::{ensure_allowed, ReactionAction};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

fn check(state: &AppState, viewer: &ViewerContext, action: ReactionAction) -> ApiResult<()> {
    ensure_allowed(
        &state.config().reactions.anonymous,
        viewer.is_anonymous(),
        action,
    )?;
    Ok(())
}

/// Counts, total and the viewer's active reaction
///
/// GET /targets/{target_type}/{target_id}/reactions
pub async fn get_summary(
    State(state): State<AppState>,
    viewer: ViewerContext,
    ApiPath(path): ApiPath<TargetPath>,
) -> ApiResult<ApiJson<ReactionSummaryResponse>> {
    check(&state, &viewer, ReactionAction::View)?;
    let target = path.target()?;

    let service = AggregationService::new(state.service_context());
    let summary = service.summary(&target, viewer.existing().as_ref()).await?;
    Ok(ApiJson(summary))
}

/// The viewer's active reaction, or `null`
///
/// GET /targets/{target_type}/{target_id}/reactions/@me
pub async fn get_current_reaction(
    State(state): State<AppState>,
    viewer: ViewerContext,
    ApiPath(path): ApiPath<TargetPath>,
) -> ApiResult<ApiJson<Option<ReactionResponse>>> {
    check(&state, &viewer, ReactionAction::View)?;
    let target = path.target()?;

    let Some(viewer) = viewer.existing() else {
        return Ok(ApiJson(None));
    };

    let service = ReactionService::new(state.service_context());
    let current = service.current_reaction(&viewer, &target).await?;
    Ok(ApiJson(current.map(ReactionResponse::from)))
}

/// Set the viewer's reaction. Anonymous visitors without a session get one.
///
/// PUT /targets/{target_type}/{target_id}/reactions/{reaction_type}/@me
pub async fn react(
    State(state): State<AppState>,
    viewer: ViewerContext,
    ApiPath(path): ApiPath<TargetReactionPath>,
) -> ApiResult<(CookieJar, ApiJson<ReactResponse>)> {
    check(&state, &viewer, ReactionAction::React)?;
    let target = path.target()?;

    let (viewer, jar) = viewer.resolve(state.config().reactions.session_cookie_secure);

    let service = ReactionService::new(state.service_context());
    let response = service
        .react_and_summarize(&viewer, &target, path.reaction_type())
        .await?;
    Ok((jar, ApiJson(response)))
}

/// Clear the viewer's reaction of the given type
///
/// DELETE /targets/{target_type}/{target_id}/reactions/{reaction_type}/@me
pub async fn remove_reaction(
    State(state): State<AppState>,
    viewer: ViewerContext,
    ApiPath(path): ApiPath<TargetReactionPath>,
) -> ApiResult<ApiJson<RemoveResponse>> {
    check(&state, &viewer, ReactionAction::Remove)?;
    let target = path.target()?;

    // A visitor without a session owns no reactions; an unsent throwaway key
    // still runs the catalog and target checks and answers `removed: false`.
    let viewer: ViewerKey = viewer
        .existing()
        .unwrap_or_else(|| IdentityResolver::resolve(None, None).viewer);

    let service = ReactionService::new(state.service_context());
    let response = service
        .remove_and_summarize(&viewer, &target, path.reaction_type())
        .await?;
    Ok(ApiJson(response))
}
