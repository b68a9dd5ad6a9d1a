//! Interaction log repository.
//!
//! The log is append-only: nothing here updates or deletes rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use shoplite_core::{InteractionKind, ProductId, UserId};

use super::RepositoryError;
use crate::models::Interaction;

/// One history row: the interaction joined with the product as it exists
/// now. The inner join drops entries whose product was deleted.
#[derive(sqlx::FromRow)]
pub struct HistoryRow {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub kind: InteractionKind,
    pub recorded_at: DateTime<Utc>,
}

/// Repository for the interaction log.
pub struct InteractionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InteractionRepository<'a> {
    /// Create a new interaction repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append an interaction with a server-assigned timestamp.
    ///
    /// The product reference is deliberately not validated; readers
    /// tolerate orphans.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn append(
        &self,
        user_id: UserId,
        product_id: ProductId,
        kind: InteractionKind,
    ) -> Result<Interaction, RepositoryError> {
        let interaction = sqlx::query_as::<_, Interaction>(
            "INSERT INTO shop.interaction (user_id, product_id, kind)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, product_id, kind, recorded_at",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(kind)
        .fetch_one(self.pool)
        .await?;

        Ok(interaction)
    }

    /// Whether the user has logged any interactions at all, orphaned or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn has_any(&self, user_id: UserId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shop.interaction WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// A user's history, newest first, joined with live product data.
    /// Entries whose product no longer exists are omitted by the join.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<HistoryRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            "SELECT i.product_id, p.name, p.description, p.category, p.price,
                    i.kind, i.recorded_at
             FROM shop.interaction i
             JOIN shop.product p ON p.id = i.product_id
             WHERE i.user_id = $1
             ORDER BY i.recorded_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Interaction counts per product over everyone except `user_id`,
    /// count-descending, truncated to `limit` products.
    ///
    /// The tie-break among equal counts is whatever order the database
    /// returns; callers must not rely on one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn top_products_excluding(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<(ProductId, i64)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (ProductId, i64)>(
            "SELECT product_id, COUNT(*) AS interactions
             FROM shop.interaction
             WHERE user_id <> $1
             GROUP BY product_id
             ORDER BY interactions DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
