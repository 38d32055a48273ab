//! Purchase initiation and payment confirmation.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use afrifilm_auth::Principal;
use afrifilm_core::config::SettlementMode;
use afrifilm_core::error::AppError;
use afrifilm_core::result::AppResult;
use afrifilm_database::PurchaseOutcome;
use afrifilm_entity::transaction::{NewTransaction, PaymentMethod, Transaction};

use super::engine::EntitlementEngine;
use crate::payment::PaymentDetails;

/// A transaction plus the reference number shown to the payer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub transaction: Transaction,
    pub reference_number: Option<String>,
}

impl EntitlementEngine {
    /// Start buying a content item.
    ///
    /// At most one paid transaction and at most one in-flight unpaid
    /// transaction exist per (user, content) pair, even under concurrent
    /// calls.
    pub async fn initiate_purchase(
        &self,
        principal: Option<&Principal>,
        content_id: Uuid,
    ) -> AppResult<PurchaseReceipt> {
        let principal =
            principal.ok_or_else(|| AppError::unauthenticated("Authentication required"))?;

        let content = self
            .contents
            .find_by_id(content_id)
            .await?
            .filter(|c| c.is_approved)
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        if content.is_free() {
            return Err(AppError::content_is_free("Content is free"));
        }

        let request = NewTransaction {
            user_id: principal.user_id,
            content_id,
            amount: content.purchase_amount(),
            is_paid: self.settlement == SettlementMode::OnCreate,
        };

        let transaction = match self.ledger.begin_purchase(request, self.pending_window).await? {
            PurchaseOutcome::Created(tx) => tx,
            PurchaseOutcome::AlreadyPaid(existing) => {
                return Err(AppError::already_purchased("Content already purchased")
                    .with_details(json!({ "transaction": existing })));
            }
            PurchaseOutcome::InFlight(existing) => {
                return Err(AppError::purchase_in_progress(
                    "A purchase of this content is already in progress",
                )
                .with_details(json!({ "transaction": existing })));
            }
        };

        let reference_number = match self.settlement {
            SettlementMode::OnCreate => {
                self.access_cache
                    .remember(content_id, principal.user_id, transaction.id)
                    .await;
                Some(self.simulator.issue_reference())
            }
            SettlementMode::OnConfirm => None,
        };

        info!(
            transaction_id = %transaction.id,
            user_id = %principal.user_id,
            content_id = %content_id,
            amount = transaction.amount,
            is_paid = transaction.is_paid,
            "Purchase initiated"
        );

        Ok(PurchaseReceipt {
            transaction,
            reference_number,
        })
    }

    /// Confirm a purchase with the payer's phone number and operator code.
    ///
    /// A declined confirmation leaves the transaction untouched so the payer
    /// may retry. Confirming an already confirmed transaction returns its
    /// stored reference.
    pub async fn confirm_payment(
        &self,
        principal: &Principal,
        transaction_id: Uuid,
        details: &PaymentDetails,
    ) -> AppResult<PurchaseReceipt> {
        let transaction = self
            .ledger
            .find_by_id(transaction_id)
            .await?
            .filter(|tx| tx.user_id == principal.user_id)
            .ok_or_else(|| AppError::not_found("Transaction not found"))?;

        self.simulator.validate(details)?;

        if transaction.is_paid && transaction.reference.is_some() {
            let reference_number = transaction.reference.clone();
            return Ok(PurchaseReceipt {
                transaction,
                reference_number,
            });
        }

        if self.simulator.should_decline() {
            warn!(
                transaction_id = %transaction.id,
                user_id = %principal.user_id,
                "Simulated operator declined payment"
            );
            return Err(AppError::payment_declined(
                "Payment was declined by the operator, please try again",
            ));
        }

        let reference = self.simulator.issue_reference();
        let settled = self
            .ledger
            .settle(transaction.id, PaymentMethod::OrangeMoney, &reference)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction not found"))?;

        self.access_cache
            .remember(settled.content_id, settled.user_id, settled.id)
            .await;

        info!(
            transaction_id = %settled.id,
            user_id = %settled.user_id,
            content_id = %settled.content_id,
            reference = ?settled.reference,
            "Payment confirmed"
        );

        let reference_number = settled.reference.clone();
        Ok(PurchaseReceipt {
            transaction: settled,
            reference_number,
        })
    }
}
