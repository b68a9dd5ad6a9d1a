//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (database ping)
//!
//! # Accounts
//! POST /register         - Create an account
//! POST /login            - Exchange credentials for an access token
//! GET  /profile          - Current user's profile (requires auth)
//! PUT  /profile          - Merge partial profile fields (requires auth)
//!
//! # Catalog
//! POST /products         - Add a product (requires auth, admin only)
//! GET  /products         - List products, ?name= substring and ?category= exact
//!
//! # Interactions
//! POST /interactions     - Record a view/like/purchase event (requires auth)
//! GET  /history          - Interaction history, newest first (requires auth)
//! GET  /recommendations  - Popular products among other users (requires auth)
//!
//! # Cart
//! POST   /cart           - Add a product to the cart (requires auth)
//! GET    /cart           - Priced cart view (requires auth)
//! DELETE /cart           - Remove a line by product_id or name (requires auth)
//! ```

pub mod auth;
pub mod cart;
pub mod interactions;
pub mod products;
pub mod profile;
pub mod recommendations;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the application router, without the health endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(profile::get_profile).put(profile::update_profile))
        .route("/products", get(products::list).post(products::create))
        .route("/interactions", post(interactions::record))
        .route("/history", get(interactions::history))
        .route("/recommendations", get(recommendations::recommend))
        .route(
            "/cart",
            post(cart::add_item).get(cart::view).delete(cart::remove_item),
        )
}
