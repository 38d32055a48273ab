//! User administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use afrifilm_auth::Principal;
use afrifilm_core::types::PageResponse;
use afrifilm_entity::user::User;

use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    admin: Principal,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<User>>, ApiError> {
    let page = state
        .moderation
        .list_users(&admin, params.into_page_request())
        .await?;
    Ok(Json(page))
}

/// POST /api/admin/users/{id}/verify
pub async fn verify_user(
    State(state): State<AppState>,
    admin: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.moderation.verify_creator(&admin, id).await?))
}
