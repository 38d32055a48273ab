//! Password policy enforcement for new accounts.

use afrifilm_core::config::AuthConfig;
use afrifilm_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password for the given account.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, password: &str, username: &str, email: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(char::is_alphabetic) || !password.chars().any(|c| c.is_ascii_digit())
        {
            return Err(AppError::validation(
                "Password must contain both letters and digits",
            ));
        }

        if !username.is_empty() && password.to_lowercase().contains(&username.to_lowercase()) {
            return Err(AppError::validation("Password must not contain the username"));
        }

        let estimate = zxcvbn::zxcvbn(password, &[username, email]);
        if estimate.score() < zxcvbn::Score::Two {
            return Err(AppError::validation(
                "Password is too easy to guess. Please choose a stronger password.",
            ));
        }

        Ok(())
    }
}
