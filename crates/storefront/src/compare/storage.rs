//! Persistence for the compare list.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use flightdeck_core::compare::CompareProduct;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_sessions::Session;

use crate::models::session_keys;

/// Errors raised by a compare storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Where a visitor's compare list lives between requests.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait CompareStorage: Send + Sync {
    /// Read the stored list; an empty list when nothing was stored yet.
    fn load(&self) -> impl Future<Output = Result<Vec<CompareProduct>, StorageError>> + Send;

    /// Replace the stored list.
    fn save(
        &self,
        products: &[CompareProduct],
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Compare list kept in the visitor's session.
#[derive(Debug, Clone)]
pub struct SessionCompareStorage {
    session: Session,
}

impl SessionCompareStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CompareStorage for SessionCompareStorage {
    async fn load(&self) -> Result<Vec<CompareProduct>, StorageError> {
        Ok(self
            .session
            .get::<Vec<CompareProduct>>(session_keys::COMPARE_PRODUCTS)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, products: &[CompareProduct]) -> Result<(), StorageError> {
        self.session
            .insert(session_keys::COMPARE_PRODUCTS, products)
            .await?;
        Ok(())
    }
}

/// Process-local storage, mainly for tests.
///
/// Reads or writes can be switched to fail to exercise degraded paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryCompareStorage {
    products: Arc<RwLock<Vec<CompareProduct>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryCompareStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `load` fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `save` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl CompareStorage for MemoryCompareStorage {
    async fn load(&self) -> Result<Vec<CompareProduct>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.products.read().await.clone())
    }

    async fn save(&self, products: &[CompareProduct]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        *self.products.write().await = products.to_vec();
        Ok(())
    }
}
