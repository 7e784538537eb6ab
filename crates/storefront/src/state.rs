//! Application state shared across handlers.

use std::sync::Arc;

use flightdeck_core::listing::{ListingConfig, ListingContext};

use crate::catalog::CatalogClient;
use crate::compare::CompareHub;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    compare_hub: CompareHub,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: CatalogClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                compare_hub: CompareHub::default(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the compare change hub.
    #[must_use]
    pub fn compare_hub(&self) -> &CompareHub {
        &self.inner.compare_hub
    }

    /// Listing configuration for a page kind.
    #[must_use]
    pub fn listing_config(&self, context: ListingContext) -> ListingConfig {
        self.inner.config.listing.config(context)
    }
}
