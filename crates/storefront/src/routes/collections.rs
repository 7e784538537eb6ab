//! Collection route handlers.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    response::Response,
};
use flightdeck_core::listing::FilterAction;
use tracing::instrument;

use super::listing::{self, ListingPage};
use crate::catalog::{CollectionSummary, ListingScope};
use crate::error::Result;
use crate::state::AppState;

/// Display all collections.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<CollectionSummary>> {
    Json(
        state
            .catalog()
            .collections()
            .iter()
            .map(CollectionSummary::from)
            .collect(),
    )
}

/// Display a collection's listing page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListingPage>> {
    let title = state.catalog().collection_by_handle(&handle)?.title.clone();
    let page = listing::page_for_query(
        &state,
        ListingScope::Collection(handle),
        title,
        query.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

/// Apply a filter action on a collection page.
#[instrument(skip(state))]
pub async fn apply(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    RawQuery(query): RawQuery,
    Json(action): Json<FilterAction>,
) -> Result<Response> {
    let title = state.catalog().collection_by_handle(&handle)?.title.clone();
    listing::apply_action(
        &state,
        ListingScope::Collection(handle),
        title,
        query.as_deref(),
        &action,
    )
    .await
}
