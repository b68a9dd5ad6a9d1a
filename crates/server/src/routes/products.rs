//! Catalog handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shoplite_core::ProductId;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Product;
use crate::services::catalog::{CatalogService, ProductFilter};
use crate::state::AppState;

/// Request to add a product to the catalog.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: Decimal,
}

/// Response from a successful product creation.
#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub product_id: ProductId,
    pub message: String,
}

/// Add a product to the catalog. Admin only.
///
/// POST /products
///
/// # Errors
///
/// Returns 403 for non-admin callers and 400 on field validation failure.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreateProductResponse>), AppError> {
    let catalog = CatalogService::new(state.pool());

    let product = catalog
        .add_product(user.id, &req.name, &req.description, &req.category, req.price)
        .await?;

    tracing::info!(product_id = %product.id, "product added");

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            product_id: product.id,
            message: "product added successfully".to_string(),
        }),
    ))
}

/// Catalog listing filters. Both optional, combined with AND.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// List catalog products, ordered by ID.
///
/// GET /products?name=&category=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let catalog = CatalogService::new(state.pool());

    let products = catalog
        .list(&ProductFilter {
            name: query.name,
            category: query.category,
        })
        .await?;

    Ok(Json(products))
}
