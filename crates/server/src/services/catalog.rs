//! Product catalog service.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use shoplite_core::UserId;

use crate::db::RepositoryError;
use crate::db::products::{NewProduct, ProductRepository};
use crate::db::users::UserRepository;
use crate::models::Product;

/// Maximum length for a product name.
const MAX_NAME_LENGTH: usize = 200;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid product: {0}")]
    InvalidProduct(String),

    #[error("admin role required")]
    PermissionDenied,

    #[error("caller identity not found")]
    CallerNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Filters for a catalog listing. Both are optional and combine with AND.
#[derive(Debug, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
}

/// Product catalog service.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
    users: UserRepository<'a>,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            users: UserRepository::new(pool),
        }
    }

    /// Add a product to the catalog. Admin-only.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PermissionDenied` if the caller is not an
    /// admin and `CatalogError::InvalidProduct` on field validation failure.
    pub async fn add_product(
        &self,
        caller: UserId,
        name: &str,
        description: &str,
        category: &str,
        price: Decimal,
    ) -> Result<Product, CatalogError> {
        let user = self
            .users
            .get_by_id(caller)
            .await?
            .ok_or(CatalogError::CallerNotFound)?;
        if !user.role.is_admin() {
            return Err(CatalogError::PermissionDenied);
        }

        validate_product(name, category, price)?;

        let product = self
            .products
            .create(&NewProduct {
                name,
                description,
                category,
                price,
            })
            .await?;

        Ok(product)
    }

    /// List catalog products matching the filter, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` on database failure.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        let products = self
            .products
            .list(filter.name.as_deref(), filter.category.as_deref())
            .await?;

        Ok(products)
    }
}

fn validate_product(name: &str, category: &str, price: Decimal) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::InvalidProduct(
            "name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(CatalogError::InvalidProduct(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    if category.trim().is_empty() {
        return Err(CatalogError::InvalidProduct(
            "category must not be empty".to_string(),
        ));
    }
    if price < Decimal::ZERO {
        return Err(CatalogError::InvalidProduct(
            "price must not be negative".to_string(),
        ));
    }

    Ok(())
}
