//! Catalog snapshot types.
//!
//! These mirror the Storefront API product and collection objects closely
//! enough that a snapshot can be exported from the platform and served as is.

use chrono::{DateTime, Utc};
use flightdeck_core::compare::CompareProduct;
use flightdeck_core::{CollectionId, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the storefront serves, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// All published products.
    #[serde(default)]
    pub products: Vec<Product>,
    /// All published collections.
    #[serde(default)]
    pub collections: Vec<Collection>,
}

// =============================================================================
// Image / Price Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Lowest and highest variant price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Price,
    /// Maximum price among all variants.
    pub max_variant_price: Price,
}

impl VariantPriceRange {
    /// Whether any variant price can fall inside `[min, max]` whole units.
    #[must_use]
    pub fn overlaps(&self, min: i64, max: i64) -> bool {
        self.max_variant_price.amount >= Decimal::from(min)
            && self.min_variant_price.amount <= Decimal::from(max)
    }
}

// =============================================================================
// Product / Collection
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Product type/category.
    #[serde(default)]
    pub product_type: String,
    /// Vendor name.
    #[serde(default)]
    pub vendor: String,
    /// Product tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Position in the best-selling ranking (1 is the top seller).
    #[serde(default)]
    pub sales_rank: Option<u32>,
    /// Variant price span.
    pub price_range: VariantPriceRange,
    /// Compare-at price for sale items.
    #[serde(default)]
    pub compare_at_price: Option<Price>,
    /// Featured image.
    #[serde(default)]
    pub featured_image: Option<Image>,
}

/// A merchandised collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: CollectionId,
    /// URL handle.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Collection image.
    #[serde(default)]
    pub image: Option<Image>,
    /// Member products in merchandised order.
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
}

// =============================================================================
// Listing Views
// =============================================================================

/// Product summary shown in a listing grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub handle: String,
    pub title: String,
    pub vendor: String,
    pub product_type: String,
    pub price: Price,
    pub compare_at_price: Option<Price>,
    pub image: Option<Image>,
    pub available: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            handle: product.handle.clone(),
            title: product.title.clone(),
            vendor: product.vendor.clone(),
            product_type: product.product_type.clone(),
            price: product.price_range.min_variant_price,
            compare_at_price: product.compare_at_price,
            image: product.featured_image.clone(),
            available: product.available_for_sale,
        }
    }
}

impl From<&Product> for CompareProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            handle: product.handle.clone(),
            title: product.title.clone(),
            vendor: product.vendor.clone(),
            product_type: product.product_type.clone(),
            price: Some(product.price_range.min_variant_price),
            image_url: product.featured_image.as_ref().map(|i| i.url.clone()),
            available: product.available_for_sale,
        }
    }
}

/// Collection summary for the collections index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<Image>,
    pub products_count: usize,
}

impl From<&Collection> for CollectionSummary {
    fn from(collection: &Collection) -> Self {
        Self {
            handle: collection.handle.clone(),
            title: collection.title.clone(),
            description: collection.description.clone(),
            image: collection.image.clone(),
            products_count: collection.product_ids.len(),
        }
    }
}

/// One selectable facet value with the number of matching products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// Filter options available on a listing scope.
///
/// Counted over the whole scope, before filters apply, so the sidebar keeps
/// offering values the visitor has not picked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub types: Vec<FacetValue>,
    pub vendors: Vec<FacetValue>,
    /// Lowest and highest variant price in the scope, in whole units.
    pub price_span: Option<(i64, i64)>,
    pub in_stock: usize,
    pub total: usize,
}

/// One page of listing results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingResults {
    pub products: Vec<ProductCard>,
    pub facets: Facets,
}
