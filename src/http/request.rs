//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Decode URL-encoded form bodies into an ordered submission
//! - Distinguish document requests from `_data` requests
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Form fields keep their body order; duplicate names are preserved
//! - Lookups return `Option`, callers choose their own defaults

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdGen;

impl MakeRequestId for RequestIdGen {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Read the correlation ID off request headers, if the layer has set one.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Query parameters understood by every route.
#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    /// Route id whose data is requested as JSON instead of a document.
    #[serde(rename = "_data")]
    pub data: Option<String>,
}

/// A decoded `application/x-www-form-urlencoded` body.
///
/// Field order follows the body; a name may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// Decode a URL-encoded body. `+` is a space, invalid UTF-8 is replaced.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let fields = url::form_urlencoded::parse(body)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        Self { fields }
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted under `name`, in body order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_plus_and_percent_escapes() {
        let form = FormSubmission::from_urlencoded(b"field1=hello+world&note=a%26b%3Dc");
        assert_eq!(form.get("field1"), Some("hello world"));
        assert_eq!(form.get("note"), Some("a&b=c"));
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn test_first_value_wins_and_order_is_kept() {
        let form = FormSubmission::from_urlencoded(b"a=1&b=2&a=3");
        assert_eq!(form.get("a"), Some("1"));
        assert_eq!(form.get_all("a").collect::<Vec<_>>(), vec!["1", "3"]);
        assert_eq!(
            form.iter().collect::<Vec<_>>(),
            vec![("a", "1"), ("b", "2"), ("a", "3")]
        );
    }

    #[test]
    fn test_missing_field_is_none() {
        let form = FormSubmission::from_urlencoded(b"other=x");
        assert_eq!(form.get("field1"), None);

        let empty = FormSubmission::from_urlencoded(b"");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_field_without_value_is_empty_string() {
        let form = FormSubmission::from_urlencoded(b"field1");
        assert_eq!(form.get("field1"), Some(""));
    }

    #[test]
    fn test_request_id_fallback() {
        let req = Request::builder().body(()).unwrap();
        assert_eq!(request_id(req.headers()), "unknown");

        let mut ids = RequestIdGen;
        let id = ids.make_request_id(&req).unwrap();
        assert!(Uuid::parse_str(id.header_value().to_str().unwrap()).is_ok());
    }
}
