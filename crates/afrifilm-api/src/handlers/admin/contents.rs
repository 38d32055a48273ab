//! Content moderation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use afrifilm_auth::Principal;
use afrifilm_core::types::PageResponse;
use afrifilm_entity::content::Content;

use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/admin/contents/pending
pub async fn list_pending(
    State(state): State<AppState>,
    admin: Principal,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<Content>>, ApiError> {
    let page = state
        .moderation
        .list_pending(&admin, params.into_page_request())
        .await?;
    Ok(Json(page))
}

/// POST /api/admin/contents/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    admin: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Content>, ApiError> {
    Ok(Json(state.moderation.approve(&admin, id).await?))
}

/// POST /api/admin/contents/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    admin: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Content>, ApiError> {
    Ok(Json(state.moderation.reject(&admin, id).await?))
}
