//! Product repository for database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use shoplite_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, name, description, category, price, created_at";

/// Fields for inserting a new product.
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub price: Decimal,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_product: &NewProduct<'_>) -> Result<Product, RepositoryError> {
        let query = format!(
            "INSERT INTO shop.product (name, description, category, price)
             VALUES ($1, $2, $3, $4)
             RETURNING {PRODUCT_COLUMNS}"
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(new_product.name)
            .bind(new_product.description)
            .bind(new_product.category)
            .bind(new_product.price)
            .fetch_one(self.pool)
            .await?;

        Ok(product)
    }

    /// List products, optionally filtered.
    ///
    /// `name` is a case-insensitive substring match, `category` an exact
    /// match; both filters AND-combine. No filters returns the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        name: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR category = $2)
             ORDER BY id"
        );

        let products = sqlx::query_as::<_, Product>(&query)
            .bind(name)
            .bind(category)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Fetch products for a set of IDs. Missing IDs are silently absent
    /// from the result; order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE id = ANY($1)");

        let products = sqlx::query_as::<_, Product>(&query)
            .bind(raw)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Find products by exact name. Names are not unique, so this can
    /// return any number of rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE name = $1");

        let products = sqlx::query_as::<_, Product>(&query)
            .bind(name)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }
}
