//! Reaction type catalog handlers

use axum::extract::State;
use reactions_service::dto::{CreateReactionTypeRequest, ReactionTypeResponse};
use reactions_service::CatalogService;

use crate::extractors::{AdminAuth, ApiPath, ReactionTypePath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// List the catalog, ordered by display weight
///
/// GET /reaction-types
pub async fn list_reaction_types(
    State(state): State<AppState>,
) -> ApiResult<ApiJson<Vec<ReactionTypeResponse>>> {
    let service = CatalogService::new(state.service_context());
    let types = service.list().await?;
    Ok(ApiJson(types.iter().map(ReactionTypeResponse::from).collect()))
}

/// Add a reaction type
///
/// POST /reaction-types
pub async fn create_reaction_type(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ValidatedJson(request): ValidatedJson<CreateReactionTypeRequest>,
) -> ApiResult<Created<ApiJson<ReactionTypeResponse>>> {
    let service = CatalogService::new(state.service_context());
    let created = service.create(request).await?;
    Ok(Created(ApiJson(created.into())))
}

/// Remove a reaction type
///
/// DELETE /reaction-types/{name}
pub async fn delete_reaction_type(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ApiPath(path): ApiPath<ReactionTypePath>,
) -> ApiResult<NoContent> {
    let service = CatalogService::new(state.service_context());
    service.delete(&path.name).await?;
    Ok(NoContent)
}
