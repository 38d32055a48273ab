//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token TTL in minutes. Applies to both bearer tokens and session cookies.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Name of the session cookie carrying the token for browser clients.
    #[serde(default = "default_cookie_name")]
    pub session_cookie_name: String,
    /// Mark the session cookie `Secure`.
    #[serde(default)]
    pub secure_cookie: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl(),
            session_cookie_name: default_cookie_name(),
            secure_cookie: false,
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    60 * 24 * 30
}

fn default_cookie_name() -> String {
    "afrifilm_session".to_string()
}

fn default_password_min() -> usize {
    8
}
