//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Health check
//!
//! # Catalog
//! GET    /api/products          - Product listing
//! GET    /api/products/{id}     - Product detail
//! GET    /api/categories        - Category listing
//!
//! # Cart
//! GET    /api/cart              - Current cart with aggregates
//! POST   /api/cart/items        - Add one unit of a product
//! PUT    /api/cart/items/{id}   - Set a line's quantity (0 removes)
//! DELETE /api/cart/items/{id}   - Remove a line
//! DELETE /api/cart              - Clear the cart
//!
//! # Orders
//! POST   /api/orders            - Submit an order
//! ```

pub mod cart;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", put(cart::update).delete(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/products", product_routes())
        .route("/api/categories", get(products::categories))
        .nest("/api/cart", cart_routes())
        .route("/api/orders", post(orders::submit))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
