//! Resolved caller identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use afrifilm_core::error::AppError;
use afrifilm_entity::user::{User, UserRole};

/// An authenticated caller, as read from the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
    /// Creators must be verified to publish.
    pub is_verified: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            is_verified: user.is_verified,
        }
    }
}

/// Outcome of identity resolution. Never an error for bad credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(Principal),
}

impl Identity {
    /// The principal, if authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(p) => Some(p),
            Self::Anonymous => None,
        }
    }

    /// The principal, or `Unauthenticated`.
    pub fn require(self) -> Result<Principal, AppError> {
        match self {
            Self::Authenticated(p) => Ok(p),
            Self::Anonymous => Err(AppError::unauthenticated("Authentication required")),
        }
    }
}
