//! Compare list extractor.
//!
//! Builds the visitor's [`CompareStore`] from the request session and the
//! shared change hub.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::compare::{CompareError, CompareStore, SessionCompareStorage, StorageError};
use crate::error::AppError;
use crate::models::session_keys;
use crate::state::AppState;

/// The current visitor's compare list.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CompareSession(compare): CompareSession) -> impl IntoResponse {
///     Json(compare.products().await)
/// }
/// ```
pub struct CompareSession(pub CompareStore<SessionCompareStorage>);

impl FromRequestParts<AppState> for CompareSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Session layer missing".to_string()))?;

        let owner = compare_owner(&session).await?;

        Ok(Self(CompareStore::new(
            SessionCompareStorage::new(session),
            state.compare_hub().clone(),
            owner,
            state.config().compare_max,
        )))
    }
}

/// The visitor's event routing token, created on first use.
async fn compare_owner(session: &Session) -> Result<Uuid, CompareError> {
    if let Ok(Some(owner)) = session.get::<Uuid>(session_keys::COMPARE_OWNER).await {
        return Ok(owner);
    }

    let owner = Uuid::new_v4();
    session
        .insert(session_keys::COMPARE_OWNER, owner)
        .await
        .map_err(StorageError::from)?;
    Ok(owner)
}
