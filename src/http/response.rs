//! Response construction.
//!
//! # Responsibilities
//! - Render document responses (HTML) with the route's derived headers
//! - Serialize data responses (JSON) with the handler's own headers
//!
//! # Design Decisions
//! - Headers are passed in explicitly; nothing is copied implicitly from
//!   loader or action results

use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Json, Response};

/// Rendered HTML document for a route.
pub fn document(html: String, headers: HeaderMap) -> Response {
    (headers, Html(html)).into_response()
}

/// JSON payload for a `_data` request.
pub fn data(payload: &str, headers: HeaderMap) -> Response {
    (headers, Json(payload)).into_response()
}
