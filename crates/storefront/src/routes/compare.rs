//! Compare list route handlers.
//!
//! Mutations answer with the full list; other tabs of the same visitor learn
//! about changes through the `compareUpdated` event stream.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{Path, State},
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
};
use flightdeck_core::ProductId;
use flightdeck_core::compare::{CompareOutcome, CompareProduct};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::compare::{CompareStorage, CompareStore, CompareUpdated};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::CompareSession;
use crate::state::AppState;

/// SSE event name for compare list changes.
pub const COMPARE_UPDATED_EVENT: &str = "compareUpdated";

/// Compare list document.
#[derive(Debug, Serialize)]
pub struct CompareView {
    pub products: Vec<CompareProduct>,
    pub count: usize,
    pub max_items: usize,
}

impl CompareView {
    async fn load<S: CompareStorage>(compare: &CompareStore<S>) -> Self {
        let products = compare.products().await;
        Self {
            count: products.len(),
            max_items: compare.max_items(),
            products,
        }
    }
}

/// Add-to-compare request body.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub product_id: ProductId,
}

/// Add-to-compare response.
#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub added: bool,
    pub outcome: CompareOutcome,
    #[serde(flatten)]
    pub list: CompareView,
}

/// Remove response.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: bool,
    #[serde(flatten)]
    pub list: CompareView,
}

/// Display the compare list.
#[instrument(skip(compare))]
pub async fn show(CompareSession(compare): CompareSession) -> Json<CompareView> {
    Json(CompareView::load(&compare).await)
}

/// Add a catalog product to the compare list.
#[instrument(skip(state, compare))]
pub async fn add(
    State(state): State<AppState>,
    CompareSession(compare): CompareSession,
    Json(request): Json<AddRequest>,
) -> Result<Json<AddResponse>> {
    let product = CompareProduct::from(state.catalog().product_by_id(&request.product_id)?);
    let outcome = compare.add(product).await?;

    if outcome.added() {
        add_breadcrumb(
            "compare",
            "Added product to compare",
            Some(&[("product_id", request.product_id.as_str())]),
        );
    }

    Ok(Json(AddResponse {
        added: outcome.added(),
        outcome,
        list: CompareView::load(&compare).await,
    }))
}

/// Remove one product; accepts the global ID or its numeric tail.
#[instrument(skip(compare))]
pub async fn remove(
    CompareSession(compare): CompareSession,
    Path(id): Path<String>,
) -> Result<Json<RemoveResponse>> {
    let target = compare
        .products()
        .await
        .into_iter()
        .map(|p| p.id)
        .find(|pid| pid.as_str() == id || pid.legacy_id() == id)
        .unwrap_or_else(|| ProductId::new(id));

    let removed = compare.remove(&target).await?;
    Ok(Json(RemoveResponse {
        removed,
        list: CompareView::load(&compare).await,
    }))
}

/// Empty the compare list.
#[instrument(skip(compare))]
pub async fn clear(CompareSession(compare): CompareSession) -> Result<Json<CompareView>> {
    compare.clear().await?;
    Ok(Json(CompareView::load(&compare).await))
}

/// Stream this visitor's compare list changes as Server-Sent Events.
#[instrument(skip(compare))]
pub async fn events(
    CompareSession(compare): CompareSession,
) -> Sse<impl futures::Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut subscription = compare.subscribe();

    let stream = async_stream::stream! {
        while let Some(update) = subscription.recv().await {
            match compare_event(&update) {
                Ok(event) => yield Ok(event),
                Err(e) => warn!(error = %e, "Skipping unserializable compare event"),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// SSE frame for one compare list change.
fn compare_event(update: &CompareUpdated) -> std::result::Result<Event, axum::Error> {
    Event::default().event(COMPARE_UPDATED_EVENT).json_data(update)
}
