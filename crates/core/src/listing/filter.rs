//! Filter state and its single-step transitions.

use serde::{Deserialize, Serialize};

use super::chips::ChipId;
use super::price::{PriceBounds, PriceRange};

/// Multi-valued filters that hold a list of labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
    /// Product type (e.g., "Flight Suits").
    Type,
    /// Vendor / brand.
    Vendor,
}

impl ListFilter {
    /// Parse from a wire name (`type` or `vendor`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "type" => Some(Self::Type),
            "vendor" => Some(Self::Vendor),
            _ => None,
        }
    }

    /// Wire name, also used as the query parameter and chip prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Vendor => "vendor",
        }
    }
}

/// The active product filters of a listing page.
///
/// `types` and `vendors` behave as ordered sets: membership is what matters
/// for matching, insertion order is what the chip row shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected price range.
    pub price: PriceRange,
    /// Selected product types.
    #[serde(rename = "type")]
    pub types: Vec<String>,
    /// Selected vendors.
    #[serde(rename = "vendor")]
    pub vendors: Vec<String>,
    /// In-stock only.
    pub available: bool,
}

impl FilterState {
    /// The unfiltered state for the given price domain.
    #[must_use]
    pub const fn new(bounds: PriceBounds) -> Self {
        Self {
            price: bounds.full_range(),
            types: Vec::new(),
            vendors: Vec::new(),
            available: false,
        }
    }

    /// Whether nothing is filtered.
    #[must_use]
    pub fn is_default(&self, bounds: PriceBounds) -> bool {
        self.price == bounds.full_range()
            && self.types.is_empty()
            && self.vendors.is_empty()
            && !self.available
    }

    /// Selected values of a list filter.
    #[must_use]
    pub fn values(&self, filter: ListFilter) -> &[String] {
        match filter {
            ListFilter::Type => &self.types,
            ListFilter::Vendor => &self.vendors,
        }
    }

    fn values_mut(&mut self, filter: ListFilter) -> &mut Vec<String> {
        match filter {
            ListFilter::Type => &mut self.types,
            ListFilter::Vendor => &mut self.vendors,
        }
    }

    /// Replace the price range as given. Clamping is the caller's concern.
    pub const fn set_price_range(&mut self, min: i64, max: i64) {
        self.price = PriceRange::new(min, max);
    }

    /// Toggle `value` in the list named by `kind`.
    ///
    /// Unknown kinds are ignored.
    pub fn toggle_list_value(&mut self, kind: &str, value: &str) {
        if let Some(filter) = ListFilter::parse(kind) {
            self.toggle(filter, value);
        }
    }

    /// Remove `value` if selected, otherwise append it. Empty values are ignored.
    pub fn toggle(&mut self, filter: ListFilter, value: &str) {
        if value.is_empty() {
            return;
        }
        let values = self.values_mut(filter);
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
        } else {
            values.push(value.to_owned());
        }
    }

    /// Select `value` unless it already is. Used when decoding.
    pub(crate) fn insert(&mut self, filter: ListFilter, value: &str) {
        let values = self.values_mut(filter);
        if !value.is_empty() && !values.iter().any(|v| v == value) {
            values.push(value.to_owned());
        }
    }

    /// Set the in-stock only flag.
    pub const fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Remove the constraint a chip stands for.
    ///
    /// Unrecognized chip IDs are ignored.
    pub fn remove_chip(&mut self, chip_id: &str, bounds: PriceBounds) {
        match ChipId::parse(chip_id) {
            Some(ChipId::Price) => self.price = bounds.full_range(),
            Some(ChipId::Available) => self.available = false,
            Some(ChipId::Value(filter, value)) => {
                self.values_mut(filter).retain(|v| *v != value);
            }
            None => {}
        }
    }

    /// Reset every filter.
    pub fn reset(&mut self, bounds: PriceBounds) {
        *self = Self::new(bounds);
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(PriceBounds::DEFAULT)
    }
}
