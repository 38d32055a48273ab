//! AfriFilm server entry point.
//!
//! Loads configuration, initializes logging, connects the stores and
//! serves the HTTP API until shutdown.

use tracing_subscriber::{EnvFilter, fmt};

use afrifilm_core::config::{AppConfig, LoggingConfig};
use afrifilm_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `AFRIFILM_CONFIG`, or from `config/default`
/// plus the `AFRIFILM_ENV` overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("AFRIFILM_CONFIG") {
        Ok(path) => AppConfig::load_from(&path),
        Err(_) => {
            let env = std::env::var("AFRIFILM_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting AfriFilm");

    let state = afrifilm_api::bootstrap(config).await?;
    afrifilm_api::run_server(state).await
}
