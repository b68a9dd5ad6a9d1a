//! Generate random interaction events for load and demo purposes.
//!
//! # Usage
//!
//! ```bash
//! shoplite-cli interactions generate --count 50
//! ```
//!
//! Events are spread uniformly across the existing users, products, and
//! interaction kinds. Seed users and products first.

use rand::seq::IndexedRandom;

use shoplite_core::{InteractionKind, ProductId, UserId};
use shoplite_server::db::interactions::InteractionRepository;

use super::{CliError, connect};

/// Generate `count` random interaction events.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if there are no users or products
/// to draw from.
pub async fn generate(count: usize) -> Result<(), CliError> {
    let pool = connect().await?;

    let user_ids: Vec<UserId> = sqlx::query_scalar("SELECT id FROM shop.user")
        .fetch_all(&pool)
        .await?;
    let product_ids: Vec<ProductId> = sqlx::query_scalar("SELECT id FROM shop.product")
        .fetch_all(&pool)
        .await?;

    if user_ids.is_empty() || product_ids.is_empty() {
        return Err(CliError::InvalidArgument(
            "no users or products to generate interactions for; run `shoplite-cli seed` first"
                .to_string(),
        ));
    }

    let interactions = InteractionRepository::new(&pool);
    let mut rng = rand::rng();

    for _ in 0..count {
        // The slices are non-empty, checked above
        let Some(&user_id) = user_ids.choose(&mut rng) else {
            break;
        };
        let Some(&product_id) = product_ids.choose(&mut rng) else {
            break;
        };
        let Some(&kind) = InteractionKind::ALL.choose(&mut rng) else {
            break;
        };

        interactions.append(user_id, product_id, kind).await?;
    }

    tracing::info!("{count} interactions generated successfully");
    Ok(())
}
