//! Evaluation of listing queries over the snapshot.
//!
//! Filters follow the platform semantics: values of one kind are
//! alternatives, different kinds must all hold.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use flightdeck_core::listing::{ProductFilter, ProductSortKey, SortInput};
use rust_decimal::prelude::ToPrimitive;

use super::types::{FacetValue, Facets, Product};

/// A product that survived filtering, with what sorting needs to know.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub product: &'a Product,
    /// Position in the scope's merchandised order.
    pub position: usize,
    /// Search relevance (zero outside search).
    pub score: u32,
}

/// Whether `product` satisfies every filter group.
#[must_use]
pub fn matches(product: &Product, filters: &[ProductFilter]) -> bool {
    let mut type_match = None;
    let mut vendor_match = None;

    for filter in filters {
        match filter {
            ProductFilter::Price { min, max } => {
                if !product.price_range.overlaps(*min, *max) {
                    return false;
                }
            }
            ProductFilter::Available(available) => {
                if product.available_for_sale != *available {
                    return false;
                }
            }
            ProductFilter::ProductType(value) => {
                *type_match.get_or_insert(false) |= product.product_type == *value;
            }
            ProductFilter::ProductVendor(value) => {
                *vendor_match.get_or_insert(false) |= product.vendor == *value;
            }
        }
    }

    type_match.unwrap_or(true) && vendor_match.unwrap_or(true)
}

/// Relevance of `product` for a free-text query.
///
/// Every term must appear somewhere; title hits weigh most. Returns `None`
/// when a term is missing. An empty query matches everything with score 0.
#[must_use]
pub fn relevance(product: &Product, query: &str) -> Option<u32> {
    let title = product.title.to_lowercase();
    let product_type = product.product_type.to_lowercase();
    let vendor = product.vendor.to_lowercase();
    let description = product.description.to_lowercase();
    let tags: Vec<String> = product.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut score = 0;
    for term in query.split_whitespace().map(str::to_lowercase) {
        let mut term_score = 0;
        if title.contains(&term) {
            term_score += 3;
        }
        if product_type.contains(&term) || vendor.contains(&term) {
            term_score += 2;
        }
        if tags.iter().any(|t| t.contains(&term)) {
            term_score += 2;
        }
        if description.contains(&term) {
            term_score += 1;
        }
        if term_score == 0 {
            return None;
        }
        score += term_score;
    }
    Some(score)
}

/// Order hits by the platform sort arguments.
///
/// Ties keep the scope's merchandised order.
pub fn sort_hits(hits: &mut [Hit<'_>], input: SortInput) {
    hits.sort_by(|a, b| {
        let primary = compare_by(a, b, input.sort_key);
        let primary = if input.reverse {
            primary.reverse()
        } else {
            primary
        };
        primary.then(a.position.cmp(&b.position))
    });
}

fn compare_by(a: &Hit<'_>, b: &Hit<'_>, key: ProductSortKey) -> Ordering {
    match key {
        ProductSortKey::CollectionDefault => Ordering::Equal,
        ProductSortKey::BestSelling => {
            let rank = |hit: &Hit<'_>| hit.product.sales_rank.unwrap_or(u32::MAX);
            rank(a).cmp(&rank(b))
        }
        ProductSortKey::Title => a
            .product
            .title
            .to_lowercase()
            .cmp(&b.product.title.to_lowercase()),
        ProductSortKey::Price => a
            .product
            .price_range
            .min_variant_price
            .amount
            .cmp(&b.product.price_range.min_variant_price.amount),
        ProductSortKey::Created => a.product.created_at.cmp(&b.product.created_at),
        ProductSortKey::Relevance => b.score.cmp(&a.score),
    }
}

/// Facet counts over a scope.
#[must_use]
pub fn facets(products: &[&Product]) -> Facets {
    let mut types: BTreeMap<&str, usize> = BTreeMap::new();
    let mut vendors: BTreeMap<&str, usize> = BTreeMap::new();
    let mut span: Option<(i64, i64)> = None;
    let mut in_stock = 0;

    for product in products {
        if !product.product_type.is_empty() {
            *types.entry(&product.product_type).or_default() += 1;
        }
        if !product.vendor.is_empty() {
            *vendors.entry(&product.vendor).or_default() += 1;
        }
        if product.available_for_sale {
            in_stock += 1;
        }

        let low = product
            .price_range
            .min_variant_price
            .amount
            .floor()
            .to_i64();
        let high = product
            .price_range
            .max_variant_price
            .amount
            .ceil()
            .to_i64();
        if let (Some(low), Some(high)) = (low, high) {
            span = Some(span.map_or((low, high), |(min, max)| (min.min(low), max.max(high))));
        }
    }

    let into_values = |counts: BTreeMap<&str, usize>| -> Vec<FacetValue> {
        counts
            .into_iter()
            .map(|(value, count)| FacetValue {
                value: value.to_owned(),
                count,
            })
            .collect()
    };

    Facets {
        types: into_values(types),
        vendors: into_values(vendors),
        price_span: span,
        in_stock,
        total: products.len(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use flightdeck_core::{CurrencyCode, Price, ProductId};
    use rust_decimal::Decimal;

    use super::super::types::VariantPriceRange;
    use super::*;

    fn product(handle: &str, product_type: &str, vendor: &str, price: i64) -> Product {
        let price = Price::new(Decimal::from(price), CurrencyCode::USD);
        Product {
            id: ProductId::new(format!("gid://shopify/Product/{handle}")),
            handle: handle.to_owned(),
            title: handle.replace('-', " "),
            description: String::new(),
            product_type: product_type.to_owned(),
            vendor: vendor.to_owned(),
            tags: Vec::new(),
            available_for_sale: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            sales_rank: None,
            price_range: VariantPriceRange {
                min_variant_price: price,
                max_variant_price: price,
            },
            compare_at_price: None,
            featured_image: None,
        }
    }

    fn hits(products: &[Product]) -> Vec<Hit<'_>> {
        products
            .iter()
            .enumerate()
            .map(|(position, product)| Hit {
                product,
                position,
                score: 0,
            })
            .collect()
    }

    #[test]
    fn test_same_kind_is_alternative() {
        let suit = product("suit", "Flight Suits", "Alpha", 100);
        let filters = vec![
            ProductFilter::ProductType("Flight Jackets".into()),
            ProductFilter::ProductType("Flight Suits".into()),
        ];
        assert!(matches(&suit, &filters));
    }

    #[test]
    fn test_different_kinds_all_apply() {
        let suit = product("suit", "Flight Suits", "Alpha", 100);
        let filters = vec![
            ProductFilter::ProductType("Flight Suits".into()),
            ProductFilter::ProductVendor("Bravo".into()),
        ];
        assert!(!matches(&suit, &filters));
    }

    #[test]
    fn test_price_and_availability() {
        let mut suit = product("suit", "Flight Suits", "Alpha", 100);
        assert!(matches(&suit, &[ProductFilter::Price { min: 50, max: 100 }]));
        assert!(!matches(&suit, &[ProductFilter::Price { min: 101, max: 500 }]));

        suit.available_for_sale = false;
        assert!(!matches(&suit, &[ProductFilter::Available(true)]));
        assert!(matches(&suit, &[]));
    }

    #[test]
    fn test_relevance_requires_every_term() {
        let mut jacket = product("leather-flight-jacket", "Outerwear", "Alpha", 250);
        jacket.tags = vec!["Aviator".into()];
        assert_eq!(relevance(&jacket, "jacket"), Some(3));
        assert_eq!(relevance(&jacket, "aviator jacket"), Some(5));
        assert_eq!(relevance(&jacket, "helmet"), None);
        assert_eq!(relevance(&jacket, "  "), Some(0));
    }

    #[test]
    fn test_sort_by_price_desc_keeps_ties_stable() {
        let products = vec![
            product("a", "", "", 20),
            product("b", "", "", 50),
            product("c", "", "", 20),
        ];
        let mut hits = hits(&products);
        sort_hits(
            &mut hits,
            SortInput {
                sort_key: ProductSortKey::Price,
                reverse: true,
            },
        );
        let order: Vec<&str> = hits.iter().map(|h| h.product.handle.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn test_best_selling_puts_unranked_last() {
        let mut products = vec![product("a", "", "", 1), product("b", "", "", 1)];
        products[1].sales_rank = Some(1);
        let mut hits = hits(&products);
        sort_hits(
            &mut hits,
            SortInput {
                sort_key: ProductSortKey::BestSelling,
                reverse: false,
            },
        );
        assert_eq!(hits[0].product.handle, "b");
    }

    #[test]
    fn test_facets() {
        let products = vec![
            product("a", "Patches", "Alpha", 12),
            product("b", "Patches", "Bravo", 30),
            product("c", "Flight Suits", "Alpha", 240),
        ];
        let refs: Vec<&Product> = products.iter().collect();
        let facets = facets(&refs);

        assert_eq!(facets.total, 3);
        assert_eq!(facets.in_stock, 3);
        assert_eq!(facets.price_span, Some((12, 240)));
        assert_eq!(facets.types[0].value, "Flight Suits");
        assert_eq!(facets.types[1].count, 2);
        assert_eq!(facets.vendors.len(), 2);
    }
}
