//! Error types for the garden API.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sprout_core::GameError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The game rejected the request before touching the state.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A request body, path, or query parameter was invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ObserverError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Game(GameError::UnknownPlot { .. }) => StatusCode::NOT_FOUND,
            Self::Game(GameError::InvalidPlant { .. }) | Self::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Game(GameError::ServiceStopped) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

// Extractor rejections answer with the same JSON envelope as game errors.

impl From<JsonRejection> for ObserverError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ObserverError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ObserverError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
