//! CLI command definitions and dispatch.

pub mod content;
pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use afrifilm_api::AppState;
use afrifilm_auth::Principal;
use afrifilm_core::config::AppConfig;
use afrifilm_core::error::AppError;
use afrifilm_entity::user::UserRole;

use crate::output::OutputFormat;

/// AfriFilm: African film and series marketplace
#[derive(Debug, Parser)]
#[command(name = "afrifilm", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the AfriFilm server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Content moderation
    Content(content::ContentArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Content(args) => content::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_from(config_path)
}

/// Helper: connect and wire the full application state
pub async fn connect(config_path: &str) -> Result<AppState, AppError> {
    let config = load_config(config_path)?;
    afrifilm_api::bootstrap(config).await
}

/// The identity moderation commands run under.
pub fn operator() -> Principal {
    Principal {
        user_id: Uuid::nil(),
        username: "cli".to_string(),
        role: UserRole::Admin,
        is_verified: true,
    }
}
