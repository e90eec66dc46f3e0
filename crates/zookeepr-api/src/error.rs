//! Error types for the API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `NotFound` | 404 | empty |
//! | `Invalid` | 400 | plain text |
//! | `Store` | 500 | JSON `{"error", "status"}`, details only in the log |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use zookeepr_store::StoreError;
use zookeepr_types::Violations;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No record has the requested id.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request body failed the record schema.
    #[error("The {noun} is not properly formatted. {violations}")]
    Invalid {
        /// Singular noun of the record kind.
        noun: &'static str,
        /// Every field that failed.
        violations: Violations,
    },

    /// The store failed to load or persist a collection.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Invalid { noun, violations } => Self::Invalid { noun, violations },
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            Self::Invalid { .. } => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            Self::Store(e) => {
                tracing::error!(error = %e, "Request failed in the store");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = serde_json::json!({
                    "error": "internal server error",
                    "status": status.as_u16(),
                });
                (status, axum::Json(body)).into_response()
            }
        }
    }
}
