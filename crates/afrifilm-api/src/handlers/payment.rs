//! Purchase handlers.

use axum::Json;
use axum::extract::{Query, State};

use afrifilm_auth::Principal;
use afrifilm_core::types::PageResponse;
use afrifilm_entity::transaction::Transaction;
use afrifilm_service::PurchaseReceipt;

use crate::dto::request::{ConfirmPaymentBody, CreatePurchaseBody};
use crate::error::ApiError;
use crate::extractors::{MaybePrincipal, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/payment/create
///
/// Anonymous callers reach the engine so that its rejection order holds.
pub async fn create_payment(
    State(state): State<AppState>,
    caller: MaybePrincipal,
    ValidatedJson(body): ValidatedJson<CreatePurchaseBody>,
) -> Result<Json<PurchaseReceipt>, ApiError> {
    let receipt = state
        .entitlement
        .initiate_purchase(caller.principal(), body.content_id)
        .await?;
    Ok(Json(receipt))
}

/// POST /api/payment/confirm
pub async fn confirm_payment(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(body): ValidatedJson<ConfirmPaymentBody>,
) -> Result<Json<PurchaseReceipt>, ApiError> {
    let receipt = state
        .entitlement
        .confirm_payment(&principal, body.transaction_id, &body.details())
        .await?;
    Ok(Json(receipt))
}

/// GET /api/payment/history
pub async fn history(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<Transaction>>, ApiError> {
    let page = state
        .entitlement
        .history(&principal, params.into_page_request())
        .await?;
    Ok(Json(page))
}
