//! Listing state, its per-page configuration, and the action reducer.

use serde::{Deserialize, Serialize};

use super::chips::{ActiveFilterChip, project_chips};
use super::codec;
use super::filter::FilterState;
use super::price::{PriceBounds, PricePolicy};
use super::sort::{ListingContext, SortKey};
use super::view::ViewColumns;

/// Context defaults for one kind of listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    /// Page kind; decides the default sort and whether `q` is read.
    pub context: ListingContext,
    /// Price slider domain.
    pub bounds: PriceBounds,
    /// Handling of inverted or out-of-domain prices in the URL.
    pub price_policy: PricePolicy,
}

impl ListingConfig {
    /// Configuration with the default price domain and policy.
    #[must_use]
    pub const fn new(context: ListingContext) -> Self {
        Self {
            context,
            bounds: PriceBounds::DEFAULT,
            price_policy: PricePolicy::Clamp,
        }
    }

    /// Use a different price domain.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: PriceBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Use a different price policy.
    #[must_use]
    pub const fn with_price_policy(mut self, price_policy: PricePolicy) -> Self {
        self.price_policy = price_policy;
        self
    }

    /// The state of a page visited without any query parameters.
    #[must_use]
    pub const fn default_state(&self) -> ListingState {
        ListingState {
            filters: FilterState::new(self.bounds),
            sort: self.context.default_sort(),
            view: ViewColumns::Four,
            query: String::new(),
        }
    }

    /// Decode a query string (with or without the leading `?`).
    #[must_use]
    pub fn decode(&self, query: &str) -> ListingState {
        codec::decode(self, query)
    }

    /// Encode `state` as a canonical query string without the leading `?`.
    #[must_use]
    pub fn encode(&self, state: &ListingState) -> String {
        codec::encode(self, state)
    }

    /// Active filter chips for `state`.
    #[must_use]
    pub fn chips(&self, state: &ListingState) -> Vec<ActiveFilterChip> {
        project_chips(&state.filters, self.bounds)
    }

    /// `path` followed by the canonical query for `state`, if any.
    #[must_use]
    pub fn url(&self, path: &str, state: &ListingState) -> String {
        let query = self.encode(state);
        if query.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{query}")
        }
    }
}

/// Everything a listing page's URL describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingState {
    /// Active filters.
    pub filters: FilterState,
    /// Selected sort.
    pub sort: SortKey,
    /// Grid columns.
    pub view: ViewColumns,
    /// Free-text query (search pages only).
    pub query: String,
}

/// One user interaction with the filter, sort or view controls.
///
/// Values arrive from the browser as strings; anything unrecognized is
/// ignored rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FilterAction {
    /// Replace the price range; the configured price policy applies.
    SetPriceRange { min: i64, max: i64 },
    /// Toggle one `type` or `vendor` value.
    ToggleValue { kind: String, value: String },
    /// Set the in-stock only flag.
    SetAvailable { available: bool },
    /// Remove the constraint behind a chip.
    RemoveChip { id: String },
    /// Reset every filter and the sort.
    ClearAll,
    /// Choose a sort key.
    SetSort { sort: String },
    /// Choose a grid column count.
    SetView { columns: u8 },
}

impl ListingState {
    /// Apply one action.
    pub fn apply(&mut self, config: &ListingConfig, action: &FilterAction) {
        match action {
            FilterAction::SetPriceRange { min, max } => {
                self.filters.set_price_range(*min, *max);
                self.filters.price = config.price_policy.apply(self.filters.price, config.bounds);
            }
            FilterAction::ToggleValue { kind, value } => {
                self.filters.toggle_list_value(kind, value);
            }
            FilterAction::SetAvailable { available } => self.filters.set_available(*available),
            FilterAction::RemoveChip { id } => self.filters.remove_chip(id, config.bounds),
            FilterAction::ClearAll => self.clear_all(config),
            FilterAction::SetSort { sort } => {
                if let Some(sort) = SortKey::parse(sort).filter(|s| config.context.allows(*s)) {
                    self.sort = sort;
                }
            }
            FilterAction::SetView { columns } => {
                if let Ok(view) = ViewColumns::try_from(*columns) {
                    self.view = view;
                }
            }
        }
    }

    /// Reset the filters and the sort together.
    ///
    /// The grid view and the search text are left alone.
    pub fn clear_all(&mut self, config: &ListingConfig) {
        self.filters.reset(config.bounds);
        self.sort = config.context.default_sort();
    }

    /// Whether the filters and sort are at their context defaults.
    #[must_use]
    pub fn is_unfiltered(&self, config: &ListingConfig) -> bool {
        self.filters.is_default(config.bounds) && self.sort == config.context.default_sort()
    }
}
