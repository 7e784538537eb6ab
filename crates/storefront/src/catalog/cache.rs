//! Cache types for listing results.

use std::sync::Arc;

use super::ListingScope;
use super::types::ListingResults;

/// Cache key for a listing page.
///
/// The canonical query string identifies the state, so equivalent URLs
/// share an entry.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Listing { scope: ListingScope, query: String },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Listing(Arc<ListingResults>),
}
