//! Access decisions.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use afrifilm_auth::Principal;
use afrifilm_core::config::{
    CreatorAccess, EntitlementConfig, MAX_PENDING_WINDOW_SECONDS, PaymentConfig, SettlementMode,
};
use afrifilm_core::error::AppError;
use afrifilm_core::result::AppResult;
use afrifilm_core::types::{PageRequest, PageResponse};
use afrifilm_database::{ContentStore, TransactionLedger};
use afrifilm_entity::content::Content;
use afrifilm_entity::transaction::Transaction;
use afrifilm_entity::user::UserRole;

use super::cache::AccessCache;
use super::decision::AccessDecision;
use crate::catalog::visibility;
use crate::payment::PaymentSimulator;

/// Decides who may play what, and mediates the purchase-to-access transition.
///
/// Every decision is recomputed from the stores. The access cache only
/// shortcuts the ledger lookup and is re-validated on every hit.
#[derive(Debug, Clone)]
pub struct EntitlementEngine {
    pub(super) contents: Arc<dyn ContentStore>,
    pub(super) ledger: Arc<dyn TransactionLedger>,
    pub(super) access_cache: AccessCache,
    pub(super) simulator: PaymentSimulator,
    creator_access: CreatorAccess,
    pub(super) settlement: SettlementMode,
    pub(super) pending_window: chrono::Duration,
}

impl EntitlementEngine {
    /// Creates a new entitlement engine.
    pub fn new(
        contents: Arc<dyn ContentStore>,
        ledger: Arc<dyn TransactionLedger>,
        access_cache: AccessCache,
        entitlement: &EntitlementConfig,
        payment: &PaymentConfig,
    ) -> Self {
        Self {
            contents,
            ledger,
            access_cache,
            simulator: PaymentSimulator::new(payment),
            creator_access: entitlement.creator_access,
            settlement: payment.settlement,
            pending_window: pending_window(payment),
        }
    }

    /// The configured settlement model.
    pub fn settlement(&self) -> SettlementMode {
        self.settlement
    }

    /// Decide access to a content item.
    ///
    /// Content that is missing, or unapproved and not visible to this caller,
    /// is `NotFound`.
    pub async fn check_access(
        &self,
        principal: Option<&Principal>,
        content_id: Uuid,
    ) -> AppResult<AccessDecision> {
        let content = self
            .contents
            .find_by_id(content_id)
            .await?
            .filter(|c| visibility::is_visible_to(c, principal))
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        self.decide(principal, &content).await
    }

    /// Decide access to an already loaded content item.
    pub async fn decide(
        &self,
        principal: Option<&Principal>,
        content: &Content,
    ) -> AppResult<AccessDecision> {
        if principal.is_some_and(|p| self.has_role_access(p, content)) {
            return Ok(AccessDecision::privileged());
        }

        if content.is_free() {
            return Ok(AccessDecision::free());
        }

        let Some(principal) = principal else {
            return Ok(AccessDecision::requires_purchase());
        };

        match self.find_grant(principal.user_id, content.id).await? {
            Some(_) => Ok(AccessDecision::purchased()),
            None => Ok(AccessDecision::requires_purchase()),
        }
    }

    fn has_role_access(&self, principal: &Principal, content: &Content) -> bool {
        match principal.role {
            UserRole::Admin => true,
            UserRole::Creator => match self.creator_access {
                CreatorAccess::All => true,
                CreatorAccess::Own => content.is_owned_by(principal.user_id),
            },
            UserRole::Viewer => false,
        }
    }

    /// The paid transaction granting the pair access, consulting the cache first.
    pub(super) async fn find_grant(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> AppResult<Option<Transaction>> {
        if let Some(tx_id) = self.access_cache.lookup(content_id, user_id).await {
            if let Some(tx) = self.ledger.find_by_id(tx_id).await? {
                if tx.is_paid && tx.user_id == user_id && tx.content_id == content_id {
                    return Ok(Some(tx));
                }
            }
            debug!(content_id = %content_id, user_id = %user_id, "Discarding stale access cache entry");
            self.access_cache.forget(content_id, user_id).await;
        }

        let paid = self.ledger.find_paid(user_id, content_id).await?;
        if let Some(tx) = &paid {
            self.access_cache.remember(content_id, user_id, tx.id).await;
        }
        Ok(paid)
    }

    /// The caller's purchase history, newest first.
    pub async fn history(
        &self,
        principal: &Principal,
        page: PageRequest,
    ) -> AppResult<PageResponse<Transaction>> {
        self.ledger.find_by_user(principal.user_id, page).await
    }
}

/// The in-flight window, clamped to the configurable maximum.
fn pending_window(payment: &PaymentConfig) -> chrono::Duration {
    let seconds = payment.pending_window_seconds.min(MAX_PENDING_WINDOW_SECONDS);
    i64::try_from(seconds)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or_else(|| chrono::Duration::seconds(30 * 60))
}
