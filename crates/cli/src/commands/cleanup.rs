//! Delete all data from the shop schema.
//!
//! # Usage
//!
//! ```bash
//! shoplite-cli cleanup --yes
//! ```

use super::{CliError, connect};

/// Delete every row from the shop tables. Requires explicit confirmation.
///
/// # Errors
///
/// Returns `CliError::NotConfirmed` unless `--yes` was passed.
pub async fn run(confirmed: bool) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::NotConfirmed);
    }

    let pool = connect().await?;

    // cart_item goes with cart via ON DELETE CASCADE
    sqlx::query("DELETE FROM shop.cart").execute(&pool).await?;
    sqlx::query("DELETE FROM shop.interaction")
        .execute(&pool)
        .await?;
    sqlx::query("DELETE FROM shop.product")
        .execute(&pool)
        .await?;
    sqlx::query("DELETE FROM shop.user").execute(&pool).await?;

    tracing::info!("Existing data cleared");
    Ok(())
}
