//! Account service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use afrifilm_auth::jwt::IssuedToken;
use afrifilm_auth::{JwtEncoder, PasswordHasher, PasswordValidator, Principal};
use afrifilm_core::config::AuthConfig;
use afrifilm_core::error::AppError;
use afrifilm_core::result::AppResult;
use afrifilm_database::UserStore;
use afrifilm_entity::user::{CreateUser, User, UserRole};

/// Self-service registration input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to `VIEWER`.
    pub role: Option<UserRole>,
}

/// A successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub user: User,
    #[serde(flatten)]
    pub token: IssuedToken,
}

/// Manages user accounts and issues session tokens.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    encoder: JwtEncoder,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            encoder: JwtEncoder::new(config),
        }
    }

    /// Register a viewer or creator account. Creators start unverified.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        let role = req.role.unwrap_or(UserRole::Viewer);
        if !role.is_self_assignable() {
            return Err(AppError::forbidden(format!("Role '{role}' cannot be self-assigned")));
        }

        let user = self
            .create_user(&req.username, &req.email, &req.password, role, false)
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    /// Create an account with any role. Used by the CLI.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: UserRole,
        is_verified: bool,
    ) -> AppResult<User> {
        let username = username.trim();
        let email = email.trim().to_lowercase();
        validate_username(username)?;
        validate_email(&email)?;
        self.validator.validate(password, username, &email)?;

        let password_hash = self.hasher.hash_password(password)?;
        self.users
            .create(CreateUser {
                username: username.to_string(),
                email,
                password_hash,
                role,
                is_verified,
            })
            .await
    }

    /// Check credentials and issue a session token.
    ///
    /// `identifier` is a username or an email address. Unknown accounts and
    /// wrong passwords fail the same way.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<LoginResult> {
        let identifier = identifier.trim();
        let user = match self.users.find_by_username(identifier).await? {
            Some(user) => Some(user),
            None if identifier.contains('@') => self.users.find_by_email(identifier).await?,
            None => None,
        };

        let Some(user) = user else {
            warn!(identifier = %identifier, reason = "unknown_account", "Login failed");
            return Err(AppError::unauthenticated("Invalid credentials"));
        };
        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, reason = "wrong_password", "Login failed");
            return Err(AppError::unauthenticated("Invalid credentials"));
        }

        let token = self.encoder.issue(&user)?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { user, token })
    }

    /// The caller's own account.
    pub async fn me(&self, principal: &Principal) -> AppResult<User> {
        self.users
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(AppError::validation("Username must be 3 to 32 characters long"));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
    {
        return Err(AppError::validation(
            "Username may contain letters, digits, '.', '-' and '_' only",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> AppResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation("Email address is invalid")),
    }
}
