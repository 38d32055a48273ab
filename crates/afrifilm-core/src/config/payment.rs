//! Payment simulation and entitlement policy configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound for `payment.pending_window_seconds` (seven days).
pub const MAX_PENDING_WINDOW_SECONDS: u64 = 7 * 24 * 60 * 60;

/// When a purchase transaction becomes paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMode {
    /// The transaction is paid only after a successful confirmation.
    #[default]
    OnConfirm,
    /// The transaction is paid as soon as it is created; confirmation
    /// only records the payment method and reference number.
    OnCreate,
}

/// How much free access a CREATOR principal receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatorAccess {
    /// Creators may watch every title without purchasing.
    All,
    /// Creators get free access to the titles they own only.
    #[default]
    Own,
}

/// Simulated Orange Money payment flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Settlement model for new transactions.
    #[serde(default)]
    pub settlement: SettlementMode,
    /// Age below which an unpaid transaction blocks a new attempt.
    #[serde(default = "default_pending_window")]
    pub pending_window_seconds: u64,
    /// The confirmation code the simulated operator accepts.
    #[serde(default = "default_accepted_code")]
    pub accepted_code: String,
    /// Probability in `[0, 1]` that a valid confirmation is declined.
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,
    /// Minimum number of digits in a payer phone number.
    #[serde(default = "default_phone_min")]
    pub phone_min_digits: usize,
    /// Maximum number of digits in a payer phone number.
    #[serde(default = "default_phone_max")]
    pub phone_max_digits: usize,
    /// Prefix of issued reference numbers.
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            settlement: SettlementMode::default(),
            pending_window_seconds: default_pending_window(),
            accepted_code: default_accepted_code(),
            failure_probability: default_failure_probability(),
            phone_min_digits: default_phone_min(),
            phone_max_digits: default_phone_max(),
            reference_prefix: default_reference_prefix(),
        }
    }
}

impl PaymentConfig {
    /// Reject values the payment flow cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.pending_window_seconds > MAX_PENDING_WINDOW_SECONDS {
            return Err(AppError::configuration(format!(
                "payment.pending_window_seconds must be at most {MAX_PENDING_WINDOW_SECONDS}"
            )));
        }
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(AppError::configuration(
                "payment.failure_probability must be within [0, 1]",
            ));
        }
        if self.phone_min_digits > self.phone_max_digits {
            return Err(AppError::configuration(
                "payment.phone_min_digits exceeds payment.phone_max_digits",
            ));
        }
        Ok(())
    }
}

/// Access decision policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementConfig {
    /// Free access scope for creators.
    #[serde(default)]
    pub creator_access: CreatorAccess,
    /// Whether the access-rights hint cache is consulted.
    #[serde(default = "default_cache_enabled")]
    pub access_cache_enabled: bool,
    /// TTL of access-rights hint entries in seconds.
    #[serde(default = "default_access_cache_ttl")]
    pub access_cache_ttl_seconds: u64,
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            creator_access: CreatorAccess::default(),
            access_cache_enabled: default_cache_enabled(),
            access_cache_ttl_seconds: default_access_cache_ttl(),
        }
    }
}

fn default_pending_window() -> u64 {
    30 * 60
}

fn default_accepted_code() -> String {
    "1234".to_string()
}

fn default_failure_probability() -> f64 {
    0.1
}

fn default_phone_min() -> usize {
    8
}

fn default_phone_max() -> usize {
    12
}

fn default_reference_prefix() -> String {
    "AFM".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

fn default_access_cache_ttl() -> u64 {
    600
}
