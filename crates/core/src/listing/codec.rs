//! Query string codec for [`ListingState`].
//!
//! Decoding never fails: missing or malformed values fall back to the context
//! defaults. Encoding is canonical: defaults are omitted so equal states
//! always produce equal, shareable URLs.

use url::form_urlencoded;

use super::filter::{FilterState, ListFilter};
use super::params;
use super::price::PriceRange;
use super::sort::SortKey;
use super::state::{ListingConfig, ListingState};
use super::view::ViewColumns;

pub(super) fn decode(config: &ListingConfig, query: &str) -> ListingState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut filters = FilterState::new(config.bounds);
    let mut price_min = None;
    let mut price_max = None;
    let mut sort = None;
    let mut view = None;
    let mut text = String::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            params::PRICE_MIN => price_min = parse_price(&value),
            params::PRICE_MAX => price_max = parse_price(&value),
            params::TYPE => filters.insert(ListFilter::Type, &value),
            params::VENDOR => filters.insert(ListFilter::Vendor, &value),
            params::AVAILABLE => filters.available = value == "true",
            params::SORT => sort = SortKey::parse(&value),
            params::VIEW => view = ViewColumns::parse(&value),
            params::QUERY if config.context.has_query() => value.trim().clone_into(&mut text),
            _ => {}
        }
    }

    if let (Some(min), Some(max)) = (price_min, price_max) {
        filters.price = config
            .price_policy
            .apply(PriceRange::new(min, max), config.bounds);
    }

    let sort = sort
        .filter(|sort| config.context.allows(*sort))
        .unwrap_or_else(|| config.context.default_sort());

    ListingState {
        filters,
        sort,
        view: view.unwrap_or_default(),
        query: text,
    }
}

pub(super) fn encode(config: &ListingConfig, state: &ListingState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if config.context.has_query() && !state.query.is_empty() {
        out.append_pair(params::QUERY, &state.query);
    }

    let filters = &state.filters;
    if filters.price != config.bounds.full_range() {
        out.append_pair(params::PRICE_MIN, &filters.price.min.to_string());
        out.append_pair(params::PRICE_MAX, &filters.price.max.to_string());
    }
    for filter in [ListFilter::Type, ListFilter::Vendor] {
        for value in filters.values(filter) {
            out.append_pair(filter.as_str(), value);
        }
    }
    if filters.available {
        out.append_pair(params::AVAILABLE, "true");
    }

    if state.sort != config.context.default_sort() {
        out.append_pair(params::SORT, state.sort.as_str());
    }
    if state.view != ViewColumns::default() {
        out.append_pair(params::VIEW, state.view.as_str());
    }

    out.finish()
}

/// Parse a price parameter as a finite number, rounded to whole units.
#[allow(clippy::cast_possible_truncation)]
fn parse_price(value: &str) -> Option<i64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::super::{ListingContext, PriceBounds, PricePolicy};
    use super::*;

    fn collection() -> ListingConfig {
        ListingConfig::new(ListingContext::Collection)
    }

    fn search() -> ListingConfig {
        ListingConfig::new(ListingContext::Search)
    }

    fn busy_state(config: &ListingConfig) -> ListingState {
        let mut state = config.default_state();
        state.filters.set_price_range(40, 260);
        state.filters.toggle(ListFilter::Type, "Flight Suits");
        state.filters.toggle(ListFilter::Type, "Patches & Pins");
        state.filters.toggle(ListFilter::Vendor, "Alpha Industries");
        state.filters.set_available(true);
        state.sort = SortKey::PriceDesc;
        state.view = ViewColumns::Two;
        state
    }

    #[test]
    fn test_empty_query_decodes_to_defaults() {
        let config = collection();
        assert_eq!(config.decode(""), config.default_state());
        assert_eq!(config.decode("?"), config.default_state());
    }

    #[test]
    fn test_default_state_encodes_empty() {
        for config in [collection(), search()] {
            assert_eq!(config.encode(&config.default_state()), "");
        }
    }

    #[test]
    fn test_roundtrip_busy_state() {
        for config in [collection(), search()] {
            let mut state = busy_state(&config);
            if config.context.has_query() {
                state.query = "flight suit".to_owned();
            }
            let encoded = config.encode(&state);
            assert_eq!(config.decode(&encoded), state, "query: {encoded}");
        }
    }

    #[test]
    fn test_roundtrip_partial_states() {
        let config = collection();
        let mut state = config.default_state();
        state.view = ViewColumns::Three;
        assert_eq!(config.encode(&state), "view=3");
        assert_eq!(config.decode(&config.encode(&state)), state);

        let mut state = config.default_state();
        state.filters.set_price_range(0, 120);
        assert_eq!(config.encode(&state), "priceMin=0&priceMax=120");
        assert_eq!(config.decode(&config.encode(&state)), state);
    }

    #[test]
    fn test_encode_parameter_order() {
        let config = search();
        let mut state = busy_state(&config);
        state.query = "jacket".to_owned();
        assert_eq!(
            config.encode(&state),
            "q=jacket&priceMin=40&priceMax=260&type=Flight+Suits&type=Patches+%26+Pins\
             &vendor=Alpha+Industries&available=true&sort=price-desc&view=2"
        );
    }

    #[test]
    fn test_flight_suits_scenario() {
        let config = collection();
        let state = config.decode("?type=Flight+Suits&type=Flight+Jackets&available=true");

        assert_eq!(state.filters.price, PriceRange::new(0, 500));
        assert_eq!(state.filters.types, ["Flight Suits", "Flight Jackets"]);
        assert!(state.filters.vendors.is_empty());
        assert!(state.filters.available);
        assert_eq!(state.sort, SortKey::Featured);
    }

    #[test]
    fn test_available_requires_exact_true() {
        let config = collection();
        assert!(!config.decode("available=TRUE").filters.available);
        assert!(!config.decode("available=1").filters.available);
        assert!(!config.decode("available=false").filters.available);
        assert!(config.decode("available=true").filters.available);
    }

    #[test]
    fn test_price_needs_both_ends() {
        let config = collection();
        assert_eq!(config.decode("priceMin=20").filters.price, PriceRange::new(0, 500));
        assert_eq!(config.decode("priceMax=20").filters.price, PriceRange::new(0, 500));
        assert_eq!(
            config.decode("priceMin=abc&priceMax=20").filters.price,
            PriceRange::new(0, 500)
        );
        assert_eq!(
            config.decode("priceMin=19.6&priceMax=80").filters.price,
            PriceRange::new(20, 80)
        );
    }

    #[test]
    fn test_out_of_domain_price_follows_policy() {
        let query = "priceMin=600&priceMax=-5";

        let clamp = collection();
        assert_eq!(clamp.decode(query).filters.price, PriceRange::new(0, 500));

        let reject = collection().with_price_policy(PricePolicy::Reject);
        assert_eq!(
            reject.decode("priceMin=50&priceMax=10").filters.price,
            PriceRange::new(0, 500)
        );

        let passthrough = collection().with_price_policy(PricePolicy::PassThrough);
        assert_eq!(passthrough.decode(query).filters.price, PriceRange::new(600, -5));
    }

    #[test]
    fn test_custom_bounds_define_the_default() {
        let bounds = PriceBounds::new(10, 1000).unwrap_or_default();
        let config = collection().with_bounds(bounds);
        let state = config.default_state();
        assert_eq!(state.filters.price, PriceRange::new(10, 1000));
        assert_eq!(config.encode(&state), "");
    }

    #[test]
    fn test_sort_falls_back_to_context_default() {
        assert_eq!(collection().decode("sort=bogus").sort, SortKey::Featured);
        assert_eq!(collection().decode("sort=relevance").sort, SortKey::Featured);
        assert_eq!(search().decode("sort=featured").sort, SortKey::Relevance);
        assert_eq!(search().decode("sort=title-asc").sort, SortKey::TitleAsc);
    }

    #[test]
    fn test_default_sort_is_omitted() {
        let config = search();
        let mut state = config.decode("sort=relevance");
        assert_eq!(config.encode(&state), "");
        state.sort = SortKey::CreatedDesc;
        assert_eq!(config.encode(&state), "sort=created-desc");
    }

    #[test]
    fn test_view_outside_set_is_default() {
        assert_eq!(collection().decode("view=5").view, ViewColumns::Four);
        assert_eq!(collection().decode("view=2").view, ViewColumns::Two);
        assert_eq!(collection().encode(&collection().decode("view=4")), "");
    }

    #[test]
    fn test_repeated_values_dedup_and_skip_empty() {
        let state = collection().decode("vendor=A&vendor=&vendor=B&vendor=A");
        assert_eq!(state.filters.vendors, ["A", "B"]);
    }

    #[test]
    fn test_query_only_in_search_context() {
        assert_eq!(search().decode("q=++flight+suit+").query, "flight suit");
        assert_eq!(collection().decode("q=flight").query, "");

        let mut state = collection().default_state();
        state.query = "ignored".to_owned();
        assert_eq!(collection().encode(&state), "");
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let config = collection();
        assert_eq!(config.decode("utm_source=mail&page=3"), config.default_state());
    }
}
