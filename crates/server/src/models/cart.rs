//! Cart domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shoplite_core::{CartId, ProductId, UserId};

/// A user's cart header row. Items live in `shop.cart_item`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user; at most one cart per user.
    pub user_id: UserId,
    /// When the cart was lazily created.
    pub created_at: DateTime<Utc>,
    /// Touched on every add/remove.
    pub updated_at: DateTime<Utc>,
}

/// One line item enriched with the live product price.
///
/// `total_price` is `price * quantity` at read time; lines whose product no
/// longer exists never reach this type.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}
