//! Product catalog served by the listing pages.
//!
//! # Architecture
//!
//! - The catalog is a snapshot of products and collections in Storefront API
//!   shape, loaded once at startup
//! - Listing state is translated into `ProductFilter` inputs and a
//!   `sortKey`/`reverse` pair, then evaluated over the snapshot
//! - Listing results are cached via `moka`, keyed by scope plus the
//!   canonical query string
//!
//! # Example
//!
//! ```rust,ignore
//! use flightdeck_storefront::catalog::{CatalogClient, ListingScope};
//!
//! let catalog = CatalogClient::load(&config.catalog_path, config.cache_ttl).await?;
//!
//! let listing_config = config.listing.config(ListingContext::Collection);
//! let state = listing_config.decode("type=Flight+Suits&sort=price-asc");
//! let results = catalog
//!     .list(&ListingScope::Collection("flight-suits".into()), &listing_config, &state)
//!     .await?;
//! ```

mod cache;
pub mod query;
pub mod types;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use flightdeck_core::ProductId;
use flightdeck_core::listing::{ListingConfig, ListingContext, ListingState};
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub use types::*;

use cache::{CacheKey, CacheValue};
use query::Hit;

/// Errors that can occur when reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Snapshot file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON is malformed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// The concrete page a listing belongs to.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum ListingScope {
    /// Products of one collection, by handle.
    Collection(String),
    /// Every product.
    AllProducts,
    /// Free-text search over every product.
    Search,
}

impl ListingScope {
    /// Page kind for this scope.
    #[must_use]
    pub const fn context(&self) -> ListingContext {
        match self {
            Self::Collection(_) => ListingContext::Collection,
            Self::AllProducts => ListingContext::AllProducts,
            Self::Search => ListingContext::Search,
        }
    }

    /// URL path of the listing page.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Collection(handle) => format!("/collections/{handle}"),
            Self::AllProducts => "/products".to_string(),
            Self::Search => "/search".to_string(),
        }
    }
}

impl fmt::Display for ListingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection(handle) => write!(f, "collection:{handle}"),
            Self::AllProducts => f.write_str("products"),
            Self::Search => f.write_str("search"),
        }
    }
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Read access to the catalog snapshot.
///
/// Cheaply cloneable; listing results are cached for the configured TTL.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    products: Vec<Product>,
    collections: Vec<Collection>,
    products_by_handle: HashMap<String, usize>,
    products_by_id: HashMap<ProductId, usize>,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path, ttl: Duration) -> Result<Self, CatalogError> {
        let bytes = tokio::fs::read(path).await?;
        let snapshot: CatalogSnapshot = serde_json::from_slice(&bytes)?;
        info!(
            products = snapshot.products.len(),
            collections = snapshot.collections.len(),
            "Catalog snapshot loaded"
        );
        Ok(Self::from_snapshot(snapshot, ttl))
    }

    /// Build a client over an in-memory snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: CatalogSnapshot, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(ttl)
            .build();

        let products_by_handle = snapshot
            .products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.handle.clone(), i))
            .collect();
        let products_by_id = snapshot
            .products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Self {
            inner: Arc::new(CatalogClientInner {
                products: snapshot.products,
                collections: snapshot.collections,
                products_by_handle,
                products_by_id,
                cache,
            }),
        }
    }

    /// All collections in snapshot order.
    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.inner.collections
    }

    /// Get a collection by its handle.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no collection has this handle.
    pub fn collection_by_handle(&self, handle: &str) -> Result<&Collection, CatalogError> {
        self.inner
            .collections
            .iter()
            .find(|c| c.handle == handle)
            .ok_or_else(|| CatalogError::NotFound(format!("Collection not found: {handle}")))
    }

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this handle.
    pub fn product_by_handle(&self, handle: &str) -> Result<&Product, CatalogError> {
        self.inner
            .products_by_handle
            .get(handle)
            .and_then(|&i| self.inner.products.get(i))
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {handle}")))
    }

    /// Get a product by its global ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this ID.
    pub fn product_by_id(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.inner
            .products_by_id
            .get(id)
            .and_then(|&i| self.inner.products.get(i))
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {id}")))
    }

    /// Run a listing query.
    ///
    /// Facets are counted over the scope (narrowed by the search text on the
    /// search page) before the filters apply.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown collection.
    #[instrument(skip_all, fields(scope = %scope))]
    pub async fn list(
        &self,
        scope: &ListingScope,
        config: &ListingConfig,
        state: &ListingState,
    ) -> Result<Arc<ListingResults>, CatalogError> {
        let cache_key = CacheKey::Listing {
            scope: scope.clone(),
            query: config.encode(state),
        };

        // Check cache
        if let Some(CacheValue::Listing(results)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for listing");
            return Ok(results);
        }

        let scoped = self.scope_products(scope)?;
        let query_text = state.query.as_str();

        let mut pool = Vec::with_capacity(scoped.len());
        for (position, product) in scoped.into_iter().enumerate() {
            let score = if matches!(scope, ListingScope::Search) {
                match query::relevance(product, query_text) {
                    Some(score) => score,
                    None => continue,
                }
            } else {
                0
            };
            pool.push(Hit {
                product,
                position,
                score,
            });
        }

        let pool_products: Vec<&Product> = pool.iter().map(|hit| hit.product).collect();
        let facets = query::facets(&pool_products);

        let filters = state.filters.to_product_filters(config.bounds);
        let mut hits: Vec<Hit<'_>> = pool
            .into_iter()
            .filter(|hit| query::matches(hit.product, &filters))
            .collect();
        query::sort_hits(&mut hits, state.sort.to_input(config.context));

        let results = Arc::new(ListingResults {
            products: hits.iter().map(|hit| ProductCard::from(hit.product)).collect(),
            facets,
        });
        debug!(matched = results.products.len(), "Listing evaluated");

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Listing(Arc::clone(&results)))
            .await;

        Ok(results)
    }

    /// Products of a scope in merchandised order.
    fn scope_products(&self, scope: &ListingScope) -> Result<Vec<&Product>, CatalogError> {
        match scope {
            ListingScope::Collection(handle) => {
                let collection = self.collection_by_handle(handle)?;
                Ok(collection
                    .product_ids
                    .iter()
                    .filter_map(|id| self.product_by_id(id).ok())
                    .collect())
            }
            ListingScope::AllProducts | ListingScope::Search => {
                Ok(self.inner.products.iter().collect())
            }
        }
    }
}
