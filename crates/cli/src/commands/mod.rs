//! CLI subcommand implementations.

pub mod admin;
pub mod cleanup;
pub mod interactions;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] shoplite_server::db::RepositoryError),

    /// Deletion attempted without confirmation.
    #[error("Refusing to delete data without --yes")]
    NotConfirmed,

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Connect to the database named by `SHOPLITE_DATABASE_URL` (falling back
/// to `DATABASE_URL`).
async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SHOPLITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("SHOPLITE_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = shoplite_server::db::create_pool(&database_url).await?;

    Ok(pool)
}
