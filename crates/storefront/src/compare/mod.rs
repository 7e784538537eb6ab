//! Visitor compare list: bounded, persisted, and observable.
//!
//! [`CompareStore`] wraps the plain [`CompareList`] with a storage backend and
//! a [`CompareHub`]. Every committed change is saved first and then published
//! with the full new list, so subscribers never need to re-read storage.

mod hub;
mod storage;

use flightdeck_core::ProductId;
use flightdeck_core::compare::{CompareList, CompareOutcome, CompareProduct};
use thiserror::Error;
use tracing::{instrument, warn};
use uuid::Uuid;

pub use hub::{CompareHub, CompareSubscription, CompareUpdated};
pub use storage::{CompareStorage, MemoryCompareStorage, SessionCompareStorage, StorageError};

/// Errors from compare list mutations.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The list could not be saved; nothing was published.
    #[error("Compare storage error: {0}")]
    Storage(#[from] StorageError),
}

/// One visitor's compare list.
#[derive(Debug, Clone)]
pub struct CompareStore<S> {
    storage: S,
    hub: CompareHub,
    owner: Uuid,
    max_items: usize,
}

impl<S: CompareStorage> CompareStore<S> {
    #[must_use]
    pub const fn new(storage: S, hub: CompareHub, owner: Uuid, max_items: usize) -> Self {
        Self {
            storage,
            hub,
            owner,
            max_items,
        }
    }

    /// Capacity of the list.
    #[must_use]
    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    /// Visitor token events are routed by.
    #[must_use]
    pub const fn owner(&self) -> Uuid {
        self.owner
    }

    /// Current products, oldest first.
    pub async fn products(&self) -> Vec<CompareProduct> {
        self.load().await.into_items()
    }

    /// Whether `id` is in the list.
    pub async fn contains(&self, id: &ProductId) -> bool {
        self.load().await.contains(id)
    }

    /// Number of products in the list.
    pub async fn count(&self) -> usize {
        self.load().await.len()
    }

    /// Add a product.
    ///
    /// A full list or an already-present product leaves storage untouched and
    /// publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::Storage` if the new list cannot be saved.
    #[instrument(skip_all, fields(owner = %self.owner, product_id = %product.id))]
    pub async fn add(&self, product: CompareProduct) -> Result<CompareOutcome, CompareError> {
        let mut list = self.load().await;
        let outcome = list.add(product);
        if outcome.added() {
            self.commit(list).await?;
        }
        Ok(outcome)
    }

    /// Remove a product; returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::Storage` if the new list cannot be saved.
    #[instrument(skip_all, fields(owner = %self.owner, product_id = %id))]
    pub async fn remove(&self, id: &ProductId) -> Result<bool, CompareError> {
        let mut list = self.load().await;
        let removed = list.remove(id);
        self.commit(list).await?;
        Ok(removed)
    }

    /// Empty the list.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::Storage` if the empty list cannot be saved.
    #[instrument(skip_all, fields(owner = %self.owner))]
    pub async fn clear(&self) -> Result<(), CompareError> {
        let mut list = self.load().await;
        list.clear();
        self.commit(list).await
    }

    /// Changes to this visitor's list from any request.
    #[must_use]
    pub fn subscribe(&self) -> CompareSubscription {
        self.hub.subscribe(self.owner)
    }

    async fn load(&self) -> CompareList {
        match self.storage.load().await {
            Ok(items) => CompareList::from_items(items, self.max_items),
            Err(e) => {
                warn!(error = %e, owner = %self.owner, "Compare list unreadable, using empty list");
                CompareList::new(self.max_items)
            }
        }
    }

    async fn commit(&self, list: CompareList) -> Result<(), CompareError> {
        self.storage.save(list.items()).await?;
        self.hub.publish(CompareUpdated {
            owner: self.owner,
            products: list.into_items(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use flightdeck_core::compare::DEFAULT_MAX_COMPARE_ITEMS;

    use super::*;

    fn product(n: u32) -> CompareProduct {
        CompareProduct {
            id: ProductId::new(format!("gid://shopify/Product/{n}")),
            handle: format!("product-{n}"),
            title: format!("Product {n}"),
            vendor: "Alpha Industries".to_string(),
            product_type: "Flight Suits".to_string(),
            price: None,
            image_url: None,
            available: true,
        }
    }

    fn store(storage: MemoryCompareStorage) -> CompareStore<MemoryCompareStorage> {
        CompareStore::new(
            storage,
            CompareHub::default(),
            Uuid::new_v4(),
            DEFAULT_MAX_COMPARE_ITEMS,
        )
    }

    #[tokio::test]
    async fn test_cap_rejects_extra_product() {
        let store = store(MemoryCompareStorage::new());
        for n in 0..4 {
            assert_eq!(store.add(product(n)).await.unwrap(), CompareOutcome::Added);
        }
        assert_eq!(store.add(product(4)).await.unwrap(), CompareOutcome::Full);
        assert_eq!(store.count().await, 4);
        assert!(!store.contains(&product(4).id).await);
    }

    #[tokio::test]
    async fn test_duplicate_is_not_added() {
        let store = store(MemoryCompareStorage::new());
        store.add(product(1)).await.unwrap();
        assert_eq!(
            store.add(product(1)).await.unwrap(),
            CompareOutcome::AlreadyPresent
        );
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_changes_are_published_with_full_list() {
        let store = store(MemoryCompareStorage::new());
        let mut subscription = store.subscribe();

        store.add(product(1)).await.unwrap();
        store.add(product(2)).await.unwrap();
        store.remove(&product(1).id).await.unwrap();

        assert_eq!(subscription.recv().await.unwrap().products.len(), 1);
        assert_eq!(subscription.recv().await.unwrap().products.len(), 2);
        let last = subscription.recv().await.unwrap();
        assert_eq!(last.products, vec![product(2)]);
    }

    #[tokio::test]
    async fn test_rejected_add_publishes_nothing() {
        let store = store(MemoryCompareStorage::new());
        store.add(product(1)).await.unwrap();
        let mut subscription = store.subscribe();

        store.add(product(1)).await.unwrap();
        store.clear().await.unwrap();

        assert!(subscription.recv().await.unwrap().products.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_storage_degrades_to_empty() {
        let storage = MemoryCompareStorage::new();
        let store = store(storage.clone());
        store.add(product(1)).await.unwrap();

        storage.fail_reads(true);
        assert!(store.products().await.is_empty());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_write_failure_is_an_error_and_not_published() {
        let storage = MemoryCompareStorage::new();
        let store = store(storage.clone());
        let mut subscription = store.subscribe();

        storage.fail_writes(true);
        let err = store.add(product(1)).await.unwrap_err();
        assert!(matches!(err, CompareError::Storage(_)));

        storage.fail_writes(false);
        assert!(store.products().await.is_empty());
        store.clear().await.unwrap();
        assert!(subscription.recv().await.unwrap().products.is_empty());
    }

    #[tokio::test]
    async fn test_clear_and_remove_missing() {
        let store = store(MemoryCompareStorage::new());
        store.add(product(1)).await.unwrap();
        assert!(!store.remove(&product(9).id).await.unwrap());
        store.clear().await.unwrap();
        assert_eq!(store.count().await, 0);
    }
}
