//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Health check
//!
//! # Listings (POST applies a filter action to the state in the query string)
//! GET    /collections             - Collection list
//! GET    /collections/{handle}    - Collection listing page
//! POST   /collections/{handle}    - Filter action, replaces URL
//! GET    /products                - All-products listing page
//! POST   /products                - Filter action, replaces URL
//! GET    /products/{handle}       - Product detail
//! GET    /search                  - Search listing page (records recent search)
//! POST   /search                  - Filter action, replaces URL
//! GET    /search/recent           - Recent searches
//! DELETE /search/recent           - Forget recent searches
//!
//! # Compare
//! GET    /compare                 - Compare list
//! POST   /compare                 - Add product by ID
//! DELETE /compare                 - Clear
//! DELETE /compare/{id}            - Remove product
//! GET    /compare/events          - SSE stream of compareUpdated
//!
//! # API
//! GET    /api/exit-popup          - Should the exit popup show
//! POST   /api/exit-popup/dismiss  - Record dismissal
//! ```

pub mod api;
pub mod collections;
pub mod compare;
pub mod listing;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::apply))
        .route("/{handle}", get(products::show))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{handle}", get(collections::show).post(collections::apply))
}

/// Create the search routes router.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search::show).post(search::apply))
        .route("/recent", get(search::recent).delete(search::clear_recent))
}

/// Create the compare routes router.
pub fn compare_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(compare::show)
                .post(compare::add)
                .delete(compare::clear),
        )
        .route("/events", get(compare::events))
        .route("/{id}", delete(compare::remove))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/exit-popup", get(api::exit_popup::status))
        .route("/exit-popup/dismiss", post(api::exit_popup::dismiss))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Listing pages
        .nest("/products", product_routes())
        .nest("/collections", collection_routes())
        .nest("/search", search_routes())
        // Compare list
        .nest("/compare", compare_routes())
        // JSON API
        .nest("/api", api_routes())
}
