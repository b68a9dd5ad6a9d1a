//! Interaction log service.
//!
//! Append-only record of user/product events, plus the per-user history
//! view that joins each event to a product snapshot.

use sqlx::PgPool;
use thiserror::Error;

use shoplite_core::{InteractionKind, ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::interactions::InteractionRepository;
use crate::models::{HistoryEntry, Interaction, ProductSnapshot};

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("no interactions found")]
    EmptyHistory,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Interaction log service.
pub struct InteractionService<'a> {
    interactions: InteractionRepository<'a>,
}

impl<'a> InteractionService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            interactions: InteractionRepository::new(pool),
        }
    }

    /// Append an interaction event to the log.
    ///
    /// The product reference is not checked against the catalog; events may
    /// outlive the products they mention.
    ///
    /// # Errors
    ///
    /// Returns `InteractionError::Repository` on database failure.
    pub async fn record(
        &self,
        user_id: UserId,
        product_id: ProductId,
        kind: InteractionKind,
    ) -> Result<Interaction, InteractionError> {
        let interaction = self.interactions.append(user_id, product_id, kind).await?;

        Ok(interaction)
    }

    /// A user's interaction history, newest first, with product snapshots.
    ///
    /// Events whose product has since been removed from the catalog are
    /// dropped from the view; dropping everything still yields an empty
    /// list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `InteractionError::EmptyHistory` only when the user has never
    /// logged an interaction.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<HistoryEntry>, InteractionError> {
        let rows = self.interactions.history(user_id).await?;
        if rows.is_empty() {
            // The join drops orphaned entries; only a truly empty log is
            // an error.
            if self.interactions.has_any(user_id).await? {
                return Ok(Vec::new());
            }
            return Err(InteractionError::EmptyHistory);
        }

        let entries = rows
            .into_iter()
            .map(|row| HistoryEntry {
                product_id: row.product_id,
                product: ProductSnapshot {
                    name: row.name,
                    description: row.description,
                    category: row.category,
                    price: row.price,
                },
                kind: row.kind,
                recorded_at: row.recorded_at,
            })
            .collect();

        Ok(entries)
    }
}
