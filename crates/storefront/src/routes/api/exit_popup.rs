//! Exit-intent popup endpoints.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::session_keys;
use crate::state::AppState;

/// Whether the popup may be shown now.
#[derive(Debug, Serialize)]
pub struct ExitPopupStatus {
    pub show: bool,
    pub dismissed_at: Option<DateTime<Utc>>,
}

/// Report whether the exit popup should be shown.
#[instrument(skip(state, session))]
pub async fn status(State(state): State<AppState>, session: Session) -> Json<ExitPopupStatus> {
    let dismissed_at = session
        .get::<DateTime<Utc>>(session_keys::EXIT_POPUP_DISMISSED_AT)
        .await
        .ok()
        .flatten();

    Json(ExitPopupStatus {
        show: state
            .config()
            .exit_popup_policy()
            .should_show(dismissed_at, Utc::now()),
        dismissed_at,
    })
}

/// Record that the visitor dismissed the popup.
#[instrument(skip(session))]
pub async fn dismiss(session: Session) -> Result<Json<ExitPopupStatus>> {
    let now = Utc::now();
    session
        .insert(session_keys::EXIT_POPUP_DISMISSED_AT, now)
        .await?;

    Ok(Json(ExitPopupStatus {
        show: false,
        dismissed_at: Some(now),
    }))
}
