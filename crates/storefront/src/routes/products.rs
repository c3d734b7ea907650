//! Catalog route handlers.
//!
//! The catalog is read-only; these handlers are thin views over it.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use stockroom_core::{Product, ProductId};
use tracing::instrument;

use crate::catalog::Category;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict the listing to one category slug.
    pub category: Option<String>,
}

/// Product listing response.
#[derive(Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

/// List products, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ProductListResponse> {
    let products = match &query.category {
        Some(slug) => state
            .catalog()
            .by_category(slug)
            .into_iter()
            .cloned()
            .collect(),
        None => state.catalog().products().to_vec(),
    };
    Json(ProductListResponse { products })
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .product(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Category listing response.
#[derive(Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

/// List categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    Json(CategoryListResponse {
        categories: state.catalog().categories().to_vec(),
    })
}
