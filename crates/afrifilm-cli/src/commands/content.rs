//! Content moderation CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use afrifilm_core::error::AppError;
use afrifilm_core::types::PageRequest;
use afrifilm_entity::content::Content;

use crate::output::{self, OutputFormat};

/// Arguments for content commands
#[derive(Debug, Args)]
pub struct ContentArgs {
    /// Content subcommand
    #[command(subcommand)]
    pub command: ContentCommand,
}

/// Content subcommands
#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// List content awaiting moderation, oldest first
    Pending {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 50)]
        per_page: u64,
    },
    /// Make content publicly visible
    Approve {
        /// Content id
        id: Uuid,
    },
    /// Hide content from the public catalog
    Reject {
        /// Content id
        id: Uuid,
    },
    /// Delete content together with its media and transactions
    Delete {
        /// Content id
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct ContentRow {
    id: String,
    title: String,
    kind: String,
    price: String,
    approved: bool,
    creator: String,
    created_at: String,
}

impl From<&Content> for ContentRow {
    fn from(c: &Content) -> Self {
        Self {
            id: c.id.to_string(),
            title: c.title.clone(),
            kind: c.kind.to_string(),
            price: c
                .price
                .map(|p| format!("{p:.2}"))
                .unwrap_or_else(|| "free".to_string()),
            approved: c.is_approved,
            creator: c.creator_id.to_string(),
            created_at: c.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute content commands
pub async fn execute(
    args: &ContentArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect(config_path).await?;
    let operator = super::operator();

    match &args.command {
        ContentCommand::Pending { page, per_page } => {
            let pending = state
                .moderation
                .list_pending(&operator, PageRequest::new(*page, *per_page))
                .await?;
            let rows: Vec<ContentRow> = pending.items.iter().map(ContentRow::from).collect();
            output::print_list(&rows, format);
        }
        ContentCommand::Approve { id } => {
            let content = state.moderation.approve(&operator, *id).await?;
            output::print_success(&format!("'{}' approved", content.title));
        }
        ContentCommand::Reject { id } => {
            let content = state.moderation.reject(&operator, *id).await?;
            output::print_success(&format!("'{}' rejected", content.title));
        }
        ContentCommand::Delete { id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("This deletes the content and every purchase of it. Continue?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let removed = state.moderation.delete_content(&operator, *id).await?;
            output::print_success(&format!(
                "Content {id} deleted ({removed} transactions removed)"
            ));
        }
    }

    Ok(())
}
