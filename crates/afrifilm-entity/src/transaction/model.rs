//! Transaction entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::TransactionStatus;

/// Payment channel recorded on a settled transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Simulated Orange Money mobile payment.
    OrangeMoney,
}

/// A purchase of one content item by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    /// Price of the content at purchase time.
    pub amount: f64,
    /// Whether this transaction grants access.
    pub is_paid: bool,
    pub payment_method: Option<PaymentMethod>,
    /// Reference number issued on confirmation.
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Lifecycle state derived from the stored columns.
    pub fn status(&self) -> TransactionStatus {
        match (self.is_paid, self.reference.is_some()) {
            (true, true) => TransactionStatus::Confirmed,
            (true, false) => TransactionStatus::Paid,
            (false, _) => TransactionStatus::Pending,
        }
    }

    /// An unpaid transaction created less than `window` ago blocks new purchases.
    pub fn is_in_flight(&self, window: Duration, now: DateTime<Utc>) -> bool {
        !self.is_paid && now - self.created_at < window
    }
}

/// Data required to record a purchase attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub amount: f64,
    /// Recorded as paid immediately when settling on create.
    pub is_paid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(is_paid: bool, reference: Option<&str>, age_secs: i64) -> Transaction {
        let created = Utc::now() - Duration::seconds(age_secs);
        Transaction {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            content_id: Uuid::new_v4(),
            amount: 1500.0,
            is_paid,
            payment_method: None,
            reference: reference.map(str::to_string),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(tx(false, None, 0).status(), TransactionStatus::Pending);
        assert_eq!(tx(true, None, 0).status(), TransactionStatus::Paid);
        assert_eq!(
            tx(true, Some("AFM-123456-654321"), 0).status(),
            TransactionStatus::Confirmed
        );
    }

    #[test]
    fn test_in_flight_window() {
        let window = Duration::minutes(30);
        assert!(tx(false, None, 60).is_in_flight(window, Utc::now()));
        assert!(!tx(false, None, 3600).is_in_flight(window, Utc::now()));
        assert!(!tx(true, None, 60).is_in_flight(window, Utc::now()));
    }
}
