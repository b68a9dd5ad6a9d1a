//! Database migration command.
//!
//! Runs the migrations embedded in the server crate against the database
//! named by `SHOPLITE_DATABASE_URL`.

use super::{CliError, connect};

/// Run pending migrations.
///
/// # Errors
///
/// Returns `CliError` if the connection or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    shoplite_server::db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
