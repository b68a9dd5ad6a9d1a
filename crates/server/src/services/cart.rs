//! Shopping cart service.
//!
//! One cart per user, created on first add. Line quantities accumulate
//! through atomic upserts so concurrent adds never lose updates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use shoplite_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::db::products::ProductRepository;
use crate::models::CartLine;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("multiple products named {0:?}, remove by product_id instead")]
    AmbiguousName(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A priced view of a user's cart.
#[derive(Debug, serde::Serialize)]
pub struct CartView {
    pub user_id: UserId,
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Shopping cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// Add `quantity` of a product to the user's cart, creating the cart if
    /// it doesn't exist yet. Adding a product already in the cart increments
    /// its line quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for quantities below 1 and
    /// `CartError::ProductNotFound` for unknown products.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartView, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        let known = self.products.get_by_ids(&[product_id]).await?;
        if known.is_empty() {
            return Err(CartError::ProductNotFound);
        }

        // The upsert already bumps updated_at
        let cart = self.carts.upsert_for_user(user_id).await?;
        self.carts.add_item(cart.id, product_id, quantity).await?;

        self.view(user_id).await
    }

    /// The user's cart with per-line and overall totals.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` when the user has never added
    /// anything.
    pub async fn view(&self, user_id: UserId) -> Result<CartView, CartError> {
        let cart = self
            .carts
            .get_by_user(user_id)
            .await?
            .ok_or(CartError::CartNotFound)?;

        let items = self
            .carts
            .priced_items(cart.id)
            .await?
            .into_iter()
            .map(|row| {
                let total_price = row.price * Decimal::from(row.quantity);
                CartLine {
                    product_id: row.product_id,
                    name: row.name,
                    price: row.price,
                    quantity: row.quantity,
                    total_price,
                }
            })
            .collect::<Vec<_>>();

        let total = items.iter().map(|line| line.total_price).sum();

        Ok(CartView {
            user_id,
            items,
            total,
            updated_at: cart.updated_at,
        })
    }

    /// Remove a product's line from the user's cart. Removing a product
    /// that isn't in the cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` when the user has no cart.
    pub async fn remove_by_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<CartView, CartError> {
        let cart = self
            .carts
            .get_by_user(user_id)
            .await?
            .ok_or(CartError::CartNotFound)?;

        let removed = self.carts.remove_item(cart.id, product_id).await?;
        if removed {
            self.carts.touch(cart.id).await?;
        }

        self.view(user_id).await
    }

    /// Remove a cart line by product name. Deprecated in favor of
    /// [`Self::remove_by_product`]; names are not unique in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` when no catalog product carries
    /// the name and `CartError::AmbiguousName` when more than one does.
    pub async fn remove_by_name(&self, user_id: UserId, name: &str) -> Result<CartView, CartError> {
        let matches = self.products.find_by_name(name).await?;
        let product = match matches.as_slice() {
            [] => return Err(CartError::ProductNotFound),
            [one] => one,
            _ => return Err(CartError::AmbiguousName(name.to_string())),
        };

        self.remove_by_product(user_id, product.id).await
    }
}
