//! Creator dashboard handlers.

use axum::Json;
use axum::extract::{Query, State};

use afrifilm_auth::Principal;
use afrifilm_core::types::PageResponse;
use afrifilm_entity::content::Content;

use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/creator/contents
pub async fn list_own_contents(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<Content>>, ApiError> {
    let page = state
        .catalog
        .list_for_creator(&principal, params.into_page_request())
        .await?;
    Ok(Json(page))
}
