//! Access decision returned by `check_access`.

use serde::{Deserialize, Serialize};

/// Whether a caller may play a content item, and why.
///
/// `is_admin` is set whenever access comes from the caller's role rather
/// than from price or a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub granted: bool,
    pub is_free: bool,
    pub is_admin: bool,
    pub requires_purchase: bool,
}

impl AccessDecision {
    /// Granted by role.
    pub fn privileged() -> Self {
        Self {
            granted: true,
            is_admin: true,
            ..Self::default()
        }
    }

    /// Granted because the content costs nothing.
    pub fn free() -> Self {
        Self {
            granted: true,
            is_free: true,
            ..Self::default()
        }
    }

    /// Granted by a paid transaction.
    pub fn purchased() -> Self {
        Self {
            granted: true,
            ..Self::default()
        }
    }

    /// Not granted; the caller must buy the content.
    pub fn requires_purchase() -> Self {
        Self {
            requires_purchase: true,
            ..Self::default()
        }
    }
}
