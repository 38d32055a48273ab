//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use afrifilm_core::error::{AppError, ErrorKind};

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Run migrations only when `auto_migrate` is enabled.
pub async fn run_if_enabled(pool: &PgPool, auto_migrate: bool) -> Result<(), AppError> {
    if auto_migrate {
        run_migrations(pool).await
    } else {
        info!("Automatic migrations disabled, skipping");
        Ok(())
    }
}
