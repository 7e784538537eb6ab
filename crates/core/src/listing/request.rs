//! Translation of listing state into Storefront API query inputs.
//!
//! Mirrors the platform's `ProductFilter` input object and its
//! `sortKey`/`reverse` arguments so a listing can be sent upstream unchanged.

use serde::{Deserialize, Serialize};

use super::filter::FilterState;
use super::price::PriceBounds;
use super::sort::{ListingContext, SortKey};

/// One entry of the Storefront API `filters` argument.
///
/// Serializes in the platform shape, e.g. `{"productVendor":"Alpha Industries"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductFilter {
    /// Inclusive price range on the variant price.
    Price { min: i64, max: i64 },
    /// Exact product type.
    ProductType(String),
    /// Exact vendor.
    ProductVendor(String),
    /// Availability for sale.
    Available(bool),
}

/// Sort keys accepted by the product and collection-products connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKey {
    /// Merchandised order of a collection.
    CollectionDefault,
    /// Sales volume.
    BestSelling,
    /// Title.
    Title,
    /// Variant price.
    Price,
    /// Creation date.
    Created,
    /// Search relevance.
    Relevance,
}

/// `sortKey` plus `reverse` for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortInput {
    /// Platform sort key.
    pub sort_key: ProductSortKey,
    /// Descending when true.
    pub reverse: bool,
}

impl SortKey {
    /// Platform sort arguments for this key on a page of kind `context`.
    #[must_use]
    pub const fn to_input(self, context: ListingContext) -> SortInput {
        let (sort_key, reverse) = match self {
            Self::Featured => match context {
                ListingContext::Collection => (ProductSortKey::CollectionDefault, false),
                ListingContext::AllProducts | ListingContext::Search => {
                    (ProductSortKey::BestSelling, false)
                }
            },
            Self::BestSelling => (ProductSortKey::BestSelling, false),
            Self::TitleAsc => (ProductSortKey::Title, false),
            Self::TitleDesc => (ProductSortKey::Title, true),
            Self::PriceAsc => (ProductSortKey::Price, false),
            Self::PriceDesc => (ProductSortKey::Price, true),
            Self::CreatedDesc => (ProductSortKey::Created, true),
            Self::CreatedAsc => (ProductSortKey::Created, false),
            Self::Relevance => (ProductSortKey::Relevance, false),
        };
        SortInput { sort_key, reverse }
    }
}

impl FilterState {
    /// Platform filters for the active constraints.
    ///
    /// Values of the same kind are alternatives; different kinds all apply.
    #[must_use]
    pub fn to_product_filters(&self, bounds: PriceBounds) -> Vec<ProductFilter> {
        let mut filters = Vec::new();
        if self.price != bounds.full_range() {
            filters.push(ProductFilter::Price {
                min: self.price.min,
                max: self.price.max,
            });
        }
        filters.extend(self.types.iter().cloned().map(ProductFilter::ProductType));
        filters.extend(self.vendors.iter().cloned().map(ProductFilter::ProductVendor));
        if self.available {
            filters.push(ProductFilter::Available(true));
        }
        filters
    }
}
