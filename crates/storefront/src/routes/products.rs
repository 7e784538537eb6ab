//! Product route handlers.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    response::Response,
};
use flightdeck_core::listing::FilterAction;
use serde::Serialize;
use tracing::instrument;

use super::listing::{self, ListingPage};
use crate::catalog::{ListingScope, Product};
use crate::error::Result;
use crate::middleware::CompareSession;
use crate::state::AppState;

const ALL_PRODUCTS_TITLE: &str = "All Products";

/// Product detail document.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    /// Whether the visitor already picked this product for comparison.
    pub in_compare: bool,
}

/// Display the all-products listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListingPage>> {
    let page = listing::page_for_query(
        &state,
        ListingScope::AllProducts,
        ALL_PRODUCTS_TITLE.to_string(),
        query.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

/// Apply a filter action on the all-products page.
#[instrument(skip(state))]
pub async fn apply(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    Json(action): Json<FilterAction>,
) -> Result<Response> {
    listing::apply_action(
        &state,
        ListingScope::AllProducts,
        ALL_PRODUCTS_TITLE.to_string(),
        query.as_deref(),
        &action,
    )
    .await
}

/// Display a product detail page.
#[instrument(skip(state, compare))]
pub async fn show(
    State(state): State<AppState>,
    CompareSession(compare): CompareSession,
    Path(handle): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = state.catalog().product_by_handle(&handle)?.clone();
    let in_compare = compare.contains(&product.id).await;
    Ok(Json(ProductDetail {
        product,
        in_compare,
    }))
}
