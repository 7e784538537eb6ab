//! Active filter chips: one removable tag per active constraint.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::filter::{FilterState, ListFilter};
use super::price::PriceBounds;

const PRICE_CHIP: &str = "price:range";
const AVAILABLE_CHIP: &str = "available:true";
const AVAILABLE_LABEL: &str = "In Stock Only";

/// A removable tag shown in the "Active Filters" row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilterChip {
    /// `type:<value>`, `vendor:<value>`, `price:range` or `available:true`.
    pub id: String,
    /// Text shown on the chip.
    pub label: String,
}

/// Parsed form of a chip ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipId {
    /// The price range chip.
    Price,
    /// The in-stock only chip.
    Available,
    /// One selected type or vendor.
    Value(ListFilter, String),
}

impl ChipId {
    /// Parse a chip ID. Splits on the first `:` only, so values may contain `:`.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            PRICE_CHIP => return Some(Self::Price),
            AVAILABLE_CHIP => return Some(Self::Available),
            _ => {}
        }
        let (prefix, value) = id.split_once(':')?;
        ListFilter::parse(prefix).map(|filter| Self::Value(filter, value.to_owned()))
    }
}

impl fmt::Display for ChipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price => f.write_str(PRICE_CHIP),
            Self::Available => f.write_str(AVAILABLE_CHIP),
            Self::Value(filter, value) => write!(f, "{}:{value}", filter.as_str()),
        }
    }
}

/// Derive the chip row for `filters`.
///
/// Order is fixed: price, types, vendors, availability. The result is empty
/// exactly when `filters` is the default state for `bounds`.
#[must_use]
pub fn project_chips(filters: &FilterState, bounds: PriceBounds) -> Vec<ActiveFilterChip> {
    let mut chips = Vec::with_capacity(filters.types.len() + filters.vendors.len() + 2);

    if filters.price != bounds.full_range() {
        chips.push(ActiveFilterChip {
            id: ChipId::Price.to_string(),
            label: format!("${} - ${}", filters.price.min, filters.price.max),
        });
    }

    for filter in [ListFilter::Type, ListFilter::Vendor] {
        chips.extend(filters.values(filter).iter().map(|value| ActiveFilterChip {
            id: ChipId::Value(filter, value.clone()).to_string(),
            label: value.clone(),
        }));
    }

    if filters.available {
        chips.push(ActiveFilterChip {
            id: ChipId::Available.to_string(),
            label: AVAILABLE_LABEL.to_owned(),
        });
    }

    chips
}
