//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three principal roles of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Browses the catalog and purchases content.
    Viewer,
    /// Publishes content once verified.
    Creator,
    /// Moderates content and users.
    Admin,
}

impl UserRole {
    /// Return the role as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Creator => "CREATOR",
            Self::Admin => "ADMIN",
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Roles a visitor may pick for themselves at registration.
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Self::Viewer | Self::Creator)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = afrifilm_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VIEWER" => Ok(Self::Viewer),
            "CREATOR" => Ok(Self::Creator),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(afrifilm_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: VIEWER, CREATOR, ADMIN"
            ))),
        }
    }
}
