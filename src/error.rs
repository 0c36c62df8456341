//! Errors surfaced to HTTP clients by route handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::HeaderError;

/// Failure while serving a route request.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The route's header derivation rejected the action's headers.
    #[error(transparent)]
    Headers(#[from] HeaderError),

    #[error("route `{0}` has no action")]
    NoAction(String),

    #[error("route `{0}` has no loader")]
    NoLoader(String),

    /// A `_data` request named a route other than the one at this path.
    #[error("no route `{requested}` at this path")]
    DataRouteMismatch { requested: String },

    #[error("failed to render view: {0}")]
    Render(#[from] minijinja::Error),
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::Headers(_) | RouteError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RouteError::NoAction(_) => StatusCode::METHOD_NOT_ALLOWED,
            RouteError::NoLoader(_) => StatusCode::BAD_REQUEST,
            RouteError::DataRouteMismatch { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // Internal details stay in the logs.
            RouteError::Headers(_) | RouteError::Render(_) => {
                (status, "Internal Server Error").into_response()
            }
            RouteError::NoAction(_) => {
                (status, [(header::ALLOW, "GET")], self.to_string()).into_response()
            }
            _ => (status, self.to_string()).into_response(),
        }
    }
}
