//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shoplite_core::ProductId;

/// A catalog product. Immutable once created.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name. Not unique; the name-keyed cart removal path treats
    /// duplicates as ambiguous.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Exact-match category label.
    pub category: String,
    /// Non-negative price.
    pub price: Decimal,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}
