//! Request-level errors for the storefront.
//!
//! Handlers return [`Result`]; [`AppError`] turns into an HTTP response and
//! reports server-side failures to Sentry on the way out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::compare::CompareError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog lookup or query failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Compare list could not be persisted.
    #[error("Compare error: {0}")]
    Compare(#[from] CompareError),

    /// Visitor session could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The router is missing a piece the handler relies on.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Compare(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Catalog(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text safe to show a visitor.
    fn public_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(what)) => what.clone(),
            Self::Compare(_) => "Compare list is temporarily unavailable".to_string(),
            Self::Catalog(_) | Self::Session(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                status = status.as_u16(),
                sentry_event_id = %event_id,
                "Request failed"
            );
        }

        (status, self.public_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Leave a Sentry breadcrumb for a visitor action.
///
/// ```rust,ignore
/// add_breadcrumb("compare", "Added product to compare", Some(&[("product_id", id)]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let data = data
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| {
            (
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            )
        })
        .collect();

    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        data,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::StorageError;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_unknown_catalog_entry_is_not_found() {
        let err = CatalogError::NotFound("Collection not found: nope".to_string());
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_compare_storage_failure_is_unavailable() {
        let err = CompareError::Storage(StorageError::Unavailable("store down".to_string()));
        assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Internal("Session layer missing".to_string());
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(CatalogError::NotFound("Product not found: x".to_string()));
        assert_eq!(err.public_message(), "Product not found: x");
    }
}
