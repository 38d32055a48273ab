//! Validation and failure injection for the simulated mobile-money gateway.

use serde::{Deserialize, Serialize};

use afrifilm_core::config::PaymentConfig;
use afrifilm_core::error::AppError;

/// What the payer submits to confirm a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub phone_number: String,
    pub code: String,
}

/// Stands in for the Orange Money operator.
#[derive(Debug, Clone)]
pub struct PaymentSimulator {
    accepted_code: String,
    failure_probability: f64,
    phone_digits: std::ops::RangeInclusive<usize>,
    reference_prefix: String,
}

impl PaymentSimulator {
    /// Creates a simulator from payment configuration.
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            accepted_code: config.accepted_code.clone(),
            failure_probability: config.failure_probability.clamp(0.0, 1.0),
            phone_digits: config.phone_min_digits..=config.phone_max_digits,
            reference_prefix: config.reference_prefix.clone(),
        }
    }

    /// Check phone number and confirmation code. Returns the normalized phone.
    pub fn validate(&self, details: &PaymentDetails) -> Result<String, AppError> {
        let phone: String = details
            .phone_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("Phone number must contain digits only"));
        }
        if !self.phone_digits.contains(&phone.len()) {
            return Err(AppError::validation(format!(
                "Phone number must contain {} to {} digits",
                self.phone_digits.start(),
                self.phone_digits.end()
            )));
        }
        if details.code.trim() != self.accepted_code {
            return Err(AppError::validation("Invalid confirmation code"));
        }

        Ok(phone)
    }

    /// Roll the simulated operator's dice.
    pub fn should_decline(&self) -> bool {
        self.failure_probability > 0.0 && rand::random::<f64>() < self.failure_probability
    }

    /// Issue a new display reference number.
    pub fn issue_reference(&self) -> String {
        super::reference::generate_reference(&self.reference_prefix)
    }
}
