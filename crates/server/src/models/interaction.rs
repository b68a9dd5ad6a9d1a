//! Interaction log domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shoplite_core::{InteractionId, InteractionKind, ProductId, UserId};

/// One append-only interaction record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Interaction {
    /// Unique interaction ID.
    pub id: InteractionId,
    /// The acting user.
    pub user_id: UserId,
    /// The product acted on. May no longer resolve; readers drop such entries.
    pub product_id: ProductId,
    /// What the user did.
    pub kind: InteractionKind,
    /// Server-assigned timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Live product fields attached to a history entry at read time.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
}

/// One entry of a user's interaction history, enriched with the product
/// as it exists now. Entries whose product was deleted are omitted upstream.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub product_id: ProductId,
    pub product: ProductSnapshot,
    pub kind: InteractionKind,
    pub recorded_at: DateTime<Utc>,
}
