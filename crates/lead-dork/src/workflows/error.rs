use crate::evidence::FetchError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

/// Failure of one analysis request.
#[derive(Debug, thiserror::Error)]
pub enum IntelError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("request body is not valid JSON: {0}")]
    InvalidBody(String),
    #[error("'{0}' is not a valid URL")]
    InvalidTarget(String),
    /// No usable evidence could be obtained for the primary target.
    #[error("{operation} failed: {source}")]
    Fatal {
        operation: &'static str,
        #[source]
        source: FetchError,
    },
    #[error("invalid lookup endpoint '{0}'")]
    Endpoint(String),
    #[error(transparent)]
    Client(#[from] FetchError),
}

impl IntelError {
    pub fn fatal(operation: &'static str, source: FetchError) -> Self {
        warn!(operation, error = %source, "analysis failed without usable evidence");
        IntelError::Fatal { operation, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            IntelError::MissingField(_)
            | IntelError::InvalidBody(_)
            | IntelError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
            IntelError::Fatal { .. } | IntelError::Endpoint(_) | IntelError::Client(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for IntelError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
