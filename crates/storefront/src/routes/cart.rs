//! Cart route handlers.
//!
//! Each handler locks the shared cart manager, applies one mutation, and
//! returns the resulting cart view so badges and cart pages can update
//! from the response alone.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockroom_core::{CartLine, ProductId};
use tracing::instrument;

use crate::cart::CartManager;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart contents with the derived aggregates.
#[derive(Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: u64,
}

impl CartView {
    fn snapshot(cart: &CartManager) -> Self {
        Self {
            items: cart.items(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Current cart contents.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::snapshot(&state.cart()))
}

/// Add one unit of a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .product(&request.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let mut cart = state.cart();
    cart.add_item(product);
    Ok(Json(CartView::snapshot(&cart)))
}

/// Set a cart line's quantity. Zero removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Json<CartView> {
    let mut cart = state.cart();
    cart.update_quantity(&id, request.quantity);
    Json(CartView::snapshot(&cart))
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<ProductId>) -> Json<CartView> {
    let mut cart = state.cart();
    cart.remove_item(&id);
    Json(CartView::snapshot(&cart))
}

/// Clear the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut cart = state.cart();
    cart.clear();
    Json(CartView::snapshot(&cart))
}
