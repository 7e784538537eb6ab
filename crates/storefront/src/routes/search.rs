//! Search route handlers.
//!
//! The search page is a listing over every product narrowed by `q`; each
//! non-empty query is remembered in the visitor's recent searches.

use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::Response,
};
use flightdeck_core::listing::FilterAction;
use flightdeck_core::recent::RecentSearches;
use serde::Serialize;
use tower_sessions::Session;
use tracing::{instrument, warn};

use super::listing::{self, ListingPage};
use crate::catalog::ListingScope;
use crate::error::Result;
use crate::models::session_keys;
use crate::state::AppState;

const SEARCH_TITLE: &str = "Search";

/// Recent searches document.
#[derive(Debug, Serialize)]
pub struct RecentSearchesView {
    pub searches: Vec<String>,
}

/// Display the search listing page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RawQuery(query): RawQuery,
) -> Result<Json<ListingPage>> {
    let page = listing::page_for_query(
        &state,
        ListingScope::Search,
        SEARCH_TITLE.to_string(),
        query.as_deref(),
    )
    .await?;

    if !page.state.query.is_empty() {
        let limit = state.config().recent_searches_max;
        let mut recent = load_recent(&session, limit).await;
        if recent.record(&page.state.query)
            && let Err(e) = session
                .insert(session_keys::RECENT_SEARCHES, recent.entries())
                .await
        {
            warn!(error = %e, "Failed to remember search");
        }
    }

    Ok(Json(page))
}

/// Apply a filter action on the search page.
#[instrument(skip(state))]
pub async fn apply(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    Json(action): Json<FilterAction>,
) -> Result<Response> {
    listing::apply_action(
        &state,
        ListingScope::Search,
        SEARCH_TITLE.to_string(),
        query.as_deref(),
        &action,
    )
    .await
}

/// The visitor's recent searches, most recent first.
#[instrument(skip(state, session))]
pub async fn recent(State(state): State<AppState>, session: Session) -> Json<RecentSearchesView> {
    let recent = load_recent(&session, state.config().recent_searches_max).await;
    Json(RecentSearchesView {
        searches: recent.into_entries(),
    })
}

/// Forget the visitor's recent searches.
#[instrument(skip(session))]
pub async fn clear_recent(session: Session) -> Result<StatusCode> {
    session
        .remove::<Vec<String>>(session_keys::RECENT_SEARCHES)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn load_recent(session: &Session, limit: usize) -> RecentSearches {
    let entries = session
        .get::<Vec<String>>(session_keys::RECENT_SEARCHES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    RecentSearches::from_entries(entries, limit)
}
