//! Bounded list of products picked for side-by-side comparison.
//!
//! The list is a plain value: persistence and change notification belong to
//! whoever owns it (the storefront keeps it in the visitor session).

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Default number of products that can be compared at once.
pub const DEFAULT_MAX_COMPARE_ITEMS: usize = 4;

/// Product summary stored in the compare list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareProduct {
    /// Product global ID.
    pub id: ProductId,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Vendor name.
    pub vendor: String,
    /// Product type.
    pub product_type: String,
    /// Lowest variant price.
    pub price: Option<Price>,
    /// Featured image URL.
    pub image_url: Option<String>,
    /// Whether any variant is available.
    pub available: bool,
}

/// Result of [`CompareList::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOutcome {
    /// Appended to the list.
    Added,
    /// The product was already in the list; nothing changed.
    AlreadyPresent,
    /// The list is full; nothing changed.
    Full,
}

impl CompareOutcome {
    /// Whether the list changed.
    #[must_use]
    pub const fn added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Ordered, duplicate-free list of at most `max_items` products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareList {
    items: Vec<CompareProduct>,
    max_items: usize,
}

impl CompareList {
    /// Create an empty list.
    #[must_use]
    pub const fn new(max_items: usize) -> Self {
        Self {
            items: Vec::new(),
            max_items,
        }
    }

    /// Rebuild a list from persisted items.
    ///
    /// Duplicates and anything past `max_items` are dropped so a tampered or
    /// stale snapshot cannot break the invariants.
    #[must_use]
    pub fn from_items(items: Vec<CompareProduct>, max_items: usize) -> Self {
        let mut list = Self::new(max_items);
        for item in items {
            list.add(item);
        }
        list
    }

    /// Maximum number of products.
    #[must_use]
    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    /// Append `product` unless it is already present or the list is full.
    pub fn add(&mut self, product: CompareProduct) -> CompareOutcome {
        if self.contains(&product.id) {
            return CompareOutcome::AlreadyPresent;
        }
        if self.items.len() >= self.max_items {
            return CompareOutcome::Full;
        }
        self.items.push(product);
        CompareOutcome::Added
    }

    /// Remove the product with `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != *id);
        self.items.len() != before
    }

    /// Remove every product.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether the product with `id` is in the list.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| item.id == *id)
    }

    /// Number of products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether another product can be added.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.items.len() >= self.max_items
    }

    /// Products in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CompareProduct] {
        &self.items
    }

    /// Take the products out.
    #[must_use]
    pub fn into_items(self) -> Vec<CompareProduct> {
        self.items
    }
}

impl Default for CompareList {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMPARE_ITEMS)
    }
}
