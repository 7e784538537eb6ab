//! Publish/subscribe hub for compare list changes.

use std::sync::Arc;

use flightdeck_core::compare::CompareProduct;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;
use uuid::Uuid;

/// Events buffered per subscriber before it starts skipping.
const DEFAULT_CAPACITY: usize = 64;

/// A visitor's compare list after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareUpdated {
    /// Visitor the list belongs to.
    #[serde(skip)]
    pub owner: Uuid,
    /// Full list after the change.
    pub products: Vec<CompareProduct>,
}

/// Fan-out of [`CompareUpdated`] events to every open subscription.
#[derive(Debug, Clone)]
pub struct CompareHub {
    sender: broadcast::Sender<Arc<CompareUpdated>>,
}

impl CompareHub {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Deliver an event; returns how many subscriptions were open.
    pub fn publish(&self, event: CompareUpdated) -> usize {
        // No open subscriptions is not an error.
        self.sender.send(Arc::new(event)).unwrap_or(0)
    }

    /// Subscribe to one visitor's changes.
    #[must_use]
    pub fn subscribe(&self, owner: Uuid) -> CompareSubscription {
        CompareSubscription {
            owner,
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for CompareHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Stream of one visitor's compare list changes.
#[derive(Debug)]
pub struct CompareSubscription {
    owner: Uuid,
    receiver: broadcast::Receiver<Arc<CompareUpdated>>,
}

impl CompareSubscription {
    /// Next change for this visitor, or `None` once the hub is gone.
    ///
    /// A subscriber that falls behind skips the missed events; the next one
    /// it sees still carries the full list.
    pub async fn recv(&mut self) -> Option<Arc<CompareUpdated>> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.owner == self.owner => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Compare subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
