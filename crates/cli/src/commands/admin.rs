//! User role management commands.
//!
//! # Usage
//!
//! ```bash
//! # Promote an existing user to admin
//! shoplite-cli admin promote --email alice@example.com
//! ```
//!
//! Registration never grants elevated roles; this is the supported path
//! to an admin account.

use shoplite_core::{Email, Role};
use shoplite_server::db::users::UserRepository;

use super::{CliError, connect};

/// Promote an existing user to the admin role.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for a malformed email and
/// `CliError::Repository` if no user has that email.
pub async fn promote(email: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    let pool = connect().await?;
    let users = UserRepository::new(&pool);

    users.set_role_by_email(&email, Role::Admin).await?;

    tracing::info!("User {email} promoted to admin");
    Ok(())
}
