//! Catalog handlers: listing, details, access probe, publishing, editing, deletion.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use afrifilm_auth::Principal;
use afrifilm_core::types::PageResponse;
use afrifilm_entity::content::Content;
use afrifilm_service::{AccessDecision, ContentSummary};

use crate::dto::request::{ContentListQuery, PublishBody, UpdateContentBody};
use crate::dto::response::DeleteResponse;
use crate::error::ApiError;
use crate::extractors::{MaybePrincipal, ValidatedJson};
use crate::state::AppState;

/// GET /api/contents
pub async fn list_contents(
    State(state): State<AppState>,
    Query(query): Query<ContentListQuery>,
) -> Result<Json<PageResponse<Content>>, ApiError> {
    let page = state
        .catalog
        .list_public(query.kind, query.page_request())
        .await?;
    Ok(Json(page))
}

/// GET /api/contents/{id}
///
/// Media locators are included only when the caller holds access.
pub async fn get_content(
    State(state): State<AppState>,
    caller: MaybePrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentSummary>, ApiError> {
    let summary = state
        .catalog
        .get_content_for_principal(id, caller.principal())
        .await?;
    Ok(Json(summary))
}

/// GET /api/contents/{id}/access
pub async fn check_access(
    State(state): State<AppState>,
    caller: MaybePrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<AccessDecision>, ApiError> {
    let decision = state.entitlement.check_access(caller.principal(), id).await?;
    Ok(Json(decision))
}

/// POST /api/contents
pub async fn create_content(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(body): ValidatedJson<PublishBody>,
) -> Result<(StatusCode, Json<Content>), ApiError> {
    let content = state.catalog.publish(&principal, body.into()).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

/// PUT /api/contents/{id}
pub async fn update_content(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateContentBody>,
) -> Result<Json<Content>, ApiError> {
    let content = state.catalog.update(&principal, id, body.into()).await?;
    Ok(Json(content))
}

/// DELETE /api/contents/{id}
pub async fn delete_content(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = state.moderation.delete_content(&principal, id).await?;
    Ok(Json(DeleteResponse {
        deleted: true,
        transactions_removed: removed,
    }))
}
