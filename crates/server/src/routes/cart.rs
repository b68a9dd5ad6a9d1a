//! Cart handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use shoplite_core::ProductId;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::services::cart::{CartService, CartView};
use crate::state::AppState;

fn default_quantity() -> i32 {
    1
}

/// Request to add a product to the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// Add a product to the current user's cart, creating the cart on first
/// use. Repeated adds accumulate into the line quantity.
///
/// POST /cart
///
/// # Errors
///
/// Returns 400 for quantities below 1 and 404 for unknown products.
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartView>, AppError> {
    let carts = CartService::new(state.pool());

    let view = carts.add_item(user.id, req.product_id, req.quantity).await?;

    Ok(Json(view))
}

/// The current user's cart with per-line and overall totals.
///
/// GET /cart
///
/// # Errors
///
/// Returns 404 when the user has never added anything.
pub async fn view(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartView>, AppError> {
    let carts = CartService::new(state.pool());

    let view = carts.view(user.id).await?;

    Ok(Json(view))
}

/// Request to remove a cart line. `product_id` is preferred; `name` is a
/// deprecated fallback that fails when the name is absent from or
/// ambiguous in the catalog.
#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub product_id: Option<ProductId>,
    pub name: Option<String>,
}

/// Remove a product's line from the current user's cart.
///
/// DELETE /cart
///
/// # Errors
///
/// Returns 400 when neither selector is supplied, 404 for an unknown name
/// or missing cart, and 409 for an ambiguous name.
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<RemoveItemRequest>,
) -> Result<Json<CartView>, AppError> {
    let carts = CartService::new(state.pool());

    let view = match (req.product_id, req.name) {
        (Some(product_id), _) => carts.remove_by_product(user.id, product_id).await?,
        (None, Some(name)) => carts.remove_by_name(user.id, &name).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "either product_id or name is required".to_string(),
            ));
        }
    };

    Ok(Json(view))
}
