//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route modules (app code, see `crate::routes`)
//!     → router.rs (RouteTable: validate ids/paths, build axum Router)
//!     → per request: loader / action / headers / template
//!     → headers.rs (explicit propagation of action headers)
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - A route exports only what it implements; missing exports are reported
//!   by `exports()` and answered with 405 for actions
//! - Final response headers are derived explicitly, never inherited

pub mod headers;
pub mod router;

use std::fmt;

use axum::http::HeaderMap;
use serde::Serialize;

use crate::http::request::FormSubmission;
use crate::view::Template;

pub use headers::{propagate, HeaderError};
pub use router::{RouteTable, RoutingError};

/// Output of a route action. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    body: String,
    headers: HeaderMap,
}

impl ActionResult {
    pub fn new(body: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            body: body.into(),
            headers,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Output of a route loader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderResult {
    data: String,
    headers: HeaderMap,
}

impl LoaderResult {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Headers available to a route when deriving its response headers.
#[derive(Debug, Clone, Copy)]
pub struct HeadersArgs<'a> {
    pub loader_headers: &'a HeaderMap,
    /// `None` when no action ran for this request.
    pub action_headers: Option<&'a HeaderMap>,
}

/// Which handlers a route module provides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Exports {
    pub loader: bool,
    pub action: bool,
    pub headers: bool,
}

/// A server-rendered route: optional loader and action, header derivation
/// and a view.
pub trait RouteModule: Send + Sync + fmt::Debug {
    /// Stable identifier, used by `_data` requests and the build manifest.
    fn id(&self) -> &str;

    /// URL path the route is mounted at.
    fn path(&self) -> &str;

    fn exports(&self) -> Exports {
        Exports::default()
    }

    /// Document title.
    fn title(&self) -> &str {
        self.id()
    }

    fn loader(&self) -> Option<LoaderResult> {
        None
    }

    fn action(&self, _submission: &FormSubmission) -> Option<ActionResult> {
        None
    }

    /// Derive the headers of the final document response.
    fn headers(&self, _args: &HeadersArgs<'_>) -> Result<HeaderMap, HeaderError> {
        Ok(HeaderMap::new())
    }

    /// Template rendering this route's document. It should extend
    /// `document.html`.
    fn template(&self) -> Template;

    /// Route-specific values exposed to the template as `route`.
    fn view_context(&self) -> minijinja::Value {
        minijinja::Value::UNDEFINED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Bare;

    impl RouteModule for Bare {
        fn id(&self) -> &str {
            "routes/bare"
        }

        fn path(&self) -> &str {
            "/bare"
        }

        fn template(&self) -> Template {
            Template {
                name: "routes/bare.html",
                source: r#"{% extends "document.html" %}"#,
            }
        }
    }

    #[test]
    fn test_default_exports_are_empty() {
        let route = Bare;
        assert_eq!(route.exports(), Exports::default());
        assert_eq!(route.title(), "routes/bare");
        assert!(route.loader().is_none());
        assert!(route.action(&FormSubmission::default()).is_none());

        let empty = HeaderMap::new();
        let args = HeadersArgs {
            loader_headers: &empty,
            action_headers: None,
        };
        assert!(route.headers(&args).unwrap().is_empty());
    }
}
