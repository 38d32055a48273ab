//! Derived transaction status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a purchase. Not stored; derived from `is_paid` and `reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Awaiting payment confirmation.
    Pending,
    /// Paid, no reference issued yet.
    Paid,
    /// Paid and confirmed with a reference number.
    Confirmed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Confirmed => "CONFIRMED",
        };
        f.write_str(s)
    }
}
