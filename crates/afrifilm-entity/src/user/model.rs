//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered account: viewer, creator, or administrator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role, fixed at registration.
    pub role: UserRole,
    /// Creators must be verified by an admin before they can publish.
    pub is_verified: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this user may publish new content.
    pub fn can_publish(&self) -> bool {
        match self.role {
            UserRole::Admin => true,
            UserRole::Creator => self.is_verified,
            UserRole::Viewer => false,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Initial verification flag.
    pub is_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, is_verified: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "amina".to_string(),
            email: "amina@example.com".to_string(),
            password_hash: String::new(),
            role,
            is_verified,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_unverified_creator_cannot_publish() {
        assert!(!user(UserRole::Creator, false).can_publish());
        assert!(user(UserRole::Creator, true).can_publish());
        assert!(!user(UserRole::Viewer, true).can_publish());
        assert!(user(UserRole::Admin, false).can_publish());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let mut u = user(UserRole::Viewer, false);
        u.password_hash = "$argon2id$secret".to_string();
        let json = serde_json::to_string(&u).expect("serialize");
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"isVerified\":false"));
    }
}
