//! Sort keys and the listing contexts that choose their defaults.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Sort order selectable from the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Featured,
    BestSelling,
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
    CreatedDesc,
    CreatedAsc,
    Relevance,
}

impl SortKey {
    /// Every sort key, in dropdown order.
    pub const ALL: [Self; 9] = [
        Self::Relevance,
        Self::Featured,
        Self::BestSelling,
        Self::TitleAsc,
        Self::TitleDesc,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::CreatedDesc,
        Self::CreatedAsc,
    ];

    /// Parse from URL parameter value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "featured" => Some(Self::Featured),
            "best-selling" => Some(Self::BestSelling),
            "title-asc" => Some(Self::TitleAsc),
            "title-desc" => Some(Self::TitleDesc),
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            "created-desc" => Some(Self::CreatedDesc),
            "created-asc" => Some(Self::CreatedAsc),
            "relevance" => Some(Self::Relevance),
            _ => None,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::BestSelling => "best-selling",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::CreatedDesc => "created-desc",
            Self::CreatedAsc => "created-asc",
            Self::Relevance => "relevance",
        }
    }

    /// Dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::BestSelling => "Best Selling",
            Self::TitleAsc => "Alphabetically, A-Z",
            Self::TitleDesc => "Alphabetically, Z-A",
            Self::PriceAsc => "Price, low to high",
            Self::PriceDesc => "Price, high to low",
            Self::CreatedDesc => "Date, new to old",
            Self::CreatedAsc => "Date, old to new",
            Self::Relevance => "Relevance",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of page a listing is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingContext {
    /// A single collection (`/collections/{handle}`).
    Collection,
    /// Every product (`/products`).
    AllProducts,
    /// Search results (`/search`).
    Search,
}

impl ListingContext {
    /// Sort used when the URL does not name one.
    #[must_use]
    pub const fn default_sort(self) -> SortKey {
        match self {
            Self::Collection | Self::AllProducts => SortKey::Featured,
            Self::Search => SortKey::Relevance,
        }
    }

    /// Whether `sort` is offered on this kind of page.
    ///
    /// Relevance only means something for a text query; search results have no
    /// merchandised "featured" order.
    #[must_use]
    pub const fn allows(self, sort: SortKey) -> bool {
        match (self, sort) {
            (Self::Collection | Self::AllProducts, SortKey::Relevance)
            | (Self::Search, SortKey::Featured) => false,
            _ => true,
        }
    }

    /// Sort options for this page, in dropdown order.
    #[must_use]
    pub fn sort_options(self) -> Vec<SortKey> {
        SortKey::ALL
            .into_iter()
            .filter(|sort| self.allows(*sort))
            .collect()
    }

    /// Whether the free-text `q` parameter belongs to this page.
    #[must_use]
    pub const fn has_query(self) -> bool {
        matches!(self, Self::Search)
    }

    /// Short name used in logs and cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::AllProducts => "all_products",
            Self::Search => "search",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrips_every_key() {
        for sort in SortKey::ALL {
            assert_eq!(SortKey::parse(sort.as_str()), Some(sort));
        }
        assert_eq!(SortKey::parse("price-ascending"), None);
        assert_eq!(SortKey::parse(""), None);
    }

    #[test]
    fn test_context_defaults() {
        assert_eq!(ListingContext::Collection.default_sort(), SortKey::Featured);
        assert_eq!(ListingContext::AllProducts.default_sort(), SortKey::Featured);
        assert_eq!(ListingContext::Search.default_sort(), SortKey::Relevance);
    }

    #[test]
    fn test_default_sort_is_always_allowed() {
        for context in [
            ListingContext::Collection,
            ListingContext::AllProducts,
            ListingContext::Search,
        ] {
            assert!(context.allows(context.default_sort()));
            assert_eq!(context.sort_options().len(), 8);
        }
    }

    #[test]
    fn test_relevance_only_in_search() {
        assert!(!ListingContext::Collection.allows(SortKey::Relevance));
        assert!(ListingContext::Search.allows(SortKey::Relevance));
        assert!(!ListingContext::Search.allows(SortKey::Featured));
    }
}
