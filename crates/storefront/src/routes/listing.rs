//! Listing page document shared by collection, all-products and search pages.
//!
//! Every listing page is the same state machine with different context
//! defaults; the handlers only pick the [`ListingScope`] and a title.

use axum::{
    Json,
    response::{AppendHeaders, IntoResponse, Response},
};
use flightdeck_core::listing::{ActiveFilterChip, FilterAction, ListingState, SortKey};
use serde::Serialize;

use crate::catalog::{Facets, ListingScope, ProductCard};
use crate::error::Result;
use crate::state::AppState;

/// Response header telling the browser to replace the current history entry.
pub const HX_REPLACE_URL: &str = "HX-Replace-Url";

/// One entry of the sort dropdown.
#[derive(Debug, Clone, Serialize)]
pub struct SortOption {
    pub value: SortKey,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything a listing page shows.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub scope: String,
    pub title: String,
    /// Canonical URL of this exact state.
    pub url: String,
    pub state: ListingState,
    pub chips: Vec<ActiveFilterChip>,
    pub sort_options: Vec<SortOption>,
    /// Grid column count.
    pub columns: u8,
    pub total: usize,
    pub products: Vec<ProductCard>,
    pub facets: Facets,
}

/// Build the page for a raw query string.
pub async fn page_for_query(
    state: &AppState,
    scope: ListingScope,
    title: String,
    raw_query: Option<&str>,
) -> Result<ListingPage> {
    let config = state.listing_config(scope.context());
    let listing = config.decode(raw_query.unwrap_or_default());
    build_page(state, scope, title, listing).await
}

/// Apply one filter action to the state in `raw_query` and answer with the
/// new page, asking the browser to replace its URL.
pub async fn apply_action(
    state: &AppState,
    scope: ListingScope,
    title: String,
    raw_query: Option<&str>,
    action: &FilterAction,
) -> Result<Response> {
    let config = state.listing_config(scope.context());
    let mut listing = config.decode(raw_query.unwrap_or_default());
    listing.apply(&config, action);

    let page = build_page(state, scope, title, listing).await?;
    Ok((AppendHeaders([(HX_REPLACE_URL, page.url.clone())]), Json(page)).into_response())
}

async fn build_page(
    state: &AppState,
    scope: ListingScope,
    title: String,
    listing: ListingState,
) -> Result<ListingPage> {
    let config = state.listing_config(scope.context());
    let results = state.catalog().list(&scope, &config, &listing).await?;

    let sort_options = config
        .context
        .sort_options()
        .into_iter()
        .map(|key| SortOption {
            value: key,
            label: key.label(),
            selected: key == listing.sort,
        })
        .collect();

    Ok(ListingPage {
        scope: scope.to_string(),
        title,
        url: config.url(&scope.path(), &listing),
        chips: config.chips(&listing),
        sort_options,
        columns: listing.view.count(),
        total: results.products.len(),
        products: results.products.clone(),
        facets: results.facets.clone(),
        state: listing,
    })
}
