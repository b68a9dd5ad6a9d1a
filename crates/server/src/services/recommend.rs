//! Popularity recommendations.
//!
//! Ranks products by how many interactions other users have recorded
//! against them, skipping everything the requesting user has touched.

use std::collections::HashMap;

use sqlx::PgPool;
use thiserror::Error;

use shoplite_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::interactions::InteractionRepository;
use crate::db::products::ProductRepository;
use crate::models::Product;

/// How many products a recommendation response carries at most.
const RECOMMENDATION_LIMIT: i64 = 5;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Popularity recommendation service.
pub struct RecommendService<'a> {
    interactions: InteractionRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> RecommendService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            interactions: InteractionRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// Up to five products popular among other users, most popular first.
    ///
    /// A user with no interaction data of their own still gets global
    /// popularity. Products that have left the catalog are dropped from
    /// the ranking rather than backfilled.
    ///
    /// # Errors
    ///
    /// Returns `RecommendError::Repository` on database failure.
    pub async fn recommend(&self, user_id: UserId) -> Result<Vec<Product>, RecommendError> {
        let ranked = self
            .interactions
            .top_products_excluding(user_id, RECOMMENDATION_LIMIT)
            .await?;

        let ids = ranked.iter().map(|(id, _)| *id).collect::<Vec<_>>();
        let products = self.products.get_by_ids(&ids).await?;

        Ok(in_rank_order(&ranked, products))
    }
}

/// Reorder fetched products to match the popularity ranking, dropping
/// ranked IDs with no surviving catalog row.
fn in_rank_order(ranked: &[(ProductId, i64)], products: Vec<Product>) -> Vec<Product> {
    let mut by_id = products
        .into_iter()
        .map(|p| (p.id, p))
        .collect::<HashMap<_, _>>();

    ranked
        .iter()
        .filter_map(|(id, _)| by_id.remove(id))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            description: String::new(),
            category: "test".to_string(),
            price: Decimal::ONE,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rank_order_preserved() {
        let ranked = vec![
            (ProductId::new(3), 9),
            (ProductId::new(1), 4),
            (ProductId::new(2), 1),
        ];
        let fetched = vec![product(1), product(2), product(3)];

        let ordered = in_rank_order(&ranked, fetched);
        let ids: Vec<i64> = ordered.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_missing_products_dropped() {
        let ranked = vec![(ProductId::new(7), 5), (ProductId::new(8), 2)];
        let fetched = vec![product(8)];

        let ordered = in_rank_order(&ranked, fetched);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].id.as_i64(), 8);
    }

    #[test]
    fn test_empty_ranking() {
        assert!(in_rank_order(&[], Vec::new()).is_empty());
    }
}
