//! Cart repository for database operations.
//!
//! All mutations are single statements. Merging a quantity into an existing
//! line is an `ON CONFLICT ... DO UPDATE` upsert, so concurrent adds for the
//! same user cannot lose updates; there is no read-modify-write window.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use shoplite_core::{CartId, ProductId, UserId};

use super::RepositoryError;
use crate::models::Cart;

const CART_COLUMNS: &str = "id, user_id, created_at, updated_at";

/// One line item joined with the live product name and price.
#[derive(sqlx::FromRow)]
pub struct PricedItemRow {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's cart, if they have one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let query = format!("SELECT {CART_COLUMNS} FROM shop.cart WHERE user_id = $1");

        let cart = sqlx::query_as::<_, Cart>(&query)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(cart)
    }

    /// Get the user's cart, creating it lazily, and touch `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert_for_user(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let query = format!(
            "INSERT INTO shop.cart (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO UPDATE SET updated_at = now()
             RETURNING {CART_COLUMNS}"
        );

        let cart = sqlx::query_as::<_, Cart>(&query)
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(cart)
    }

    /// Add `quantity` of a product to the cart, merging into an existing
    /// line if the product is already present.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO shop.cart_item (cart_id, product_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT (cart_id, product_id)
             DO UPDATE SET quantity = shop.cart_item.quantity + excluded.quantity",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove a product's line from the cart.
    ///
    /// Removing an absent product is a no-op; returns whether a line was
    /// actually deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn remove_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM shop.cart_item WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Touch the cart's `updated_at` timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn touch(&self, cart_id: CartId) -> Result<DateTime<Utc>, RepositoryError> {
        let (updated_at,): (DateTime<Utc>,) = sqlx::query_as(
            "UPDATE shop.cart SET updated_at = now() WHERE id = $1 RETURNING updated_at",
        )
        .bind(cart_id)
        .fetch_one(self.pool)
        .await?;

        Ok(updated_at)
    }

    /// Line items joined with live product data. Lines whose product no
    /// longer exists are dropped by the join.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn priced_items(
        &self,
        cart_id: CartId,
    ) -> Result<Vec<PricedItemRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, PricedItemRow>(
            "SELECT ci.product_id, p.name, p.price, ci.quantity
             FROM shop.cart_item ci
             JOIN shop.product p ON p.id = ci.product_id
             WHERE ci.cart_id = $1
             ORDER BY ci.id",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
