//! Filter, sort and view state for product listing pages.
//!
//! Every product grid (a collection, all products, search results) shares the
//! same state machine. A [`ListingConfig`] carries the per-page context
//! defaults; the URL query string is the only durable representation of a
//! [`ListingState`].
//!
//! ```text
//! query string ──decode──▶ ListingState ──apply(FilterAction)──▶ ListingState
//!      ▲                                                              │
//!      └───────────────────────────encode─────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use flightdeck_core::listing::{FilterAction, ListingConfig, ListingContext};
//!
//! let config = ListingConfig::new(ListingContext::Collection);
//! let mut state = config.decode("type=Flight+Suits&type=Flight+Jackets&available=true");
//!
//! state.apply(&config, &FilterAction::RemoveChip { id: "type:Flight Suits".into() });
//! assert_eq!(config.encode(&state), "type=Flight+Jackets&available=true");
//! ```

mod chips;
mod codec;
mod filter;
mod price;
mod request;
mod sort;
mod state;
mod view;

pub use chips::{ActiveFilterChip, ChipId, project_chips};
pub use filter::{FilterState, ListFilter};
pub use price::{PriceBounds, PriceBoundsError, PricePolicy, PricePolicyError, PriceRange};
pub use request::{ProductFilter, ProductSortKey, SortInput};
pub use sort::{ListingContext, SortKey};
pub use state::{FilterAction, ListingConfig, ListingState};
pub use view::{ViewColumns, ViewColumnsError};

/// Query parameter names read and written by the codec.
pub mod params {
    /// Lower end of the price range.
    pub const PRICE_MIN: &str = "priceMin";
    /// Upper end of the price range.
    pub const PRICE_MAX: &str = "priceMax";
    /// Repeated product type filter.
    pub const TYPE: &str = "type";
    /// Repeated vendor filter.
    pub const VENDOR: &str = "vendor";
    /// In-stock only flag.
    pub const AVAILABLE: &str = "available";
    /// Sort key.
    pub const SORT: &str = "sort";
    /// Grid column count.
    pub const VIEW: &str = "view";
    /// Free-text search query.
    pub const QUERY: &str = "q";
}
