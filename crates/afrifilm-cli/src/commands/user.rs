//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use afrifilm_core::error::AppError;
use afrifilm_core::types::PageRequest;
use afrifilm_entity::user::{User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users, newest first
    List {
        /// Filter by role (VIEWER, CREATOR, ADMIN)
        #[arg(short, long)]
        role: Option<UserRole>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 50)]
        per_page: u64,
    },
    /// Create an account with any role
    Create {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Email
        #[arg(short, long)]
        email: String,
        /// Role (VIEWER, CREATOR, ADMIN)
        #[arg(short, long, default_value = "ADMIN")]
        role: UserRole,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Mark a creator account as verified
    Verify {
        /// User id
        id: Uuid,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Verified
    verified: bool,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            verified: u.is_verified,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect(config_path).await?;
    let operator = super::operator();

    match &args.command {
        UserCommand::List {
            role,
            page,
            per_page,
        } => {
            let users = state
                .moderation
                .list_users(&operator, PageRequest::new(*page, *per_page))
                .await?;

            let rows: Vec<UserRow> = users
                .items
                .iter()
                .filter(|u| role.is_none_or(|r| u.role == r))
                .map(UserRow::from)
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::Create {
            username,
            email,
            role,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt(format!("Password for '{username}'"))
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            // Accounts created by an operator skip creator verification.
            let user = state
                .accounts
                .create_user(username, email, &password, *role, true)
                .await?;

            output::print_success(&format!(
                "{} '{}' created (id: {})",
                user.role, user.username, user.id
            ));
        }
        UserCommand::Verify { id } => {
            let user = state.moderation.verify_creator(&operator, *id).await?;
            output::print_success(&format!("Creator '{}' verified", user.username));
        }
    }

    Ok(())
}
