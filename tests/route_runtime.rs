//! Route runtime behavior for modules other than `/actions`: loader headers,
//! header derivation failures and routes without an action.

use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::Router;
use remix_actions::config::AppConfig;
use remix_actions::http::{FormSubmission, HttpServer};
use remix_actions::routing::{
    propagate, ActionResult, HeaderError, HeadersArgs, LoaderResult, RouteModule, RouteTable,
};
use remix_actions::view::Template;
use tower::ServiceExt;

mod common;
use common::{body_text, get, post_form};

const X_TEST: HeaderName = HeaderName::from_static("x-test");

/// Loader-only route whose document reuses the loader's cache policy.
#[derive(Debug)]
struct Cached;

impl RouteModule for Cached {
    fn id(&self) -> &str {
        "routes/cached"
    }

    fn path(&self) -> &str {
        "/cached"
    }

    fn loader(&self) -> Option<LoaderResult> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=60"));
        Some(LoaderResult::new("cached data").with_headers(headers))
    }

    fn headers(&self, args: &HeadersArgs<'_>) -> Result<HeaderMap, HeaderError> {
        propagate(args.loader_headers, &[header::CACHE_CONTROL])
    }

    fn template(&self) -> Template {
        Template {
            name: "routes/cached.html",
            source: r#"{% extends "document.html" %}{% block content %}<p>{{ view.loader_data }}</p>{% endblock %}"#,
        }
    }
}

/// Route whose action forgets the header its `headers` export requires.
#[derive(Debug)]
struct Untagged;

impl RouteModule for Untagged {
    fn id(&self) -> &str {
        "routes/untagged"
    }

    fn path(&self) -> &str {
        "/untagged"
    }

    fn action(&self, _submission: &FormSubmission) -> Option<ActionResult> {
        Some(ActionResult::new("done", HeaderMap::new()))
    }

    fn headers(&self, args: &HeadersArgs<'_>) -> Result<HeaderMap, HeaderError> {
        match args.action_headers {
            Some(action_headers) => propagate(action_headers, &[X_TEST]),
            None => Ok(HeaderMap::new()),
        }
    }

    fn template(&self) -> Template {
        Template {
            name: "routes/untagged.html",
            source: r#"{% extends "document.html" %}{% block content %}{{ view.action_data }}{% endblock %}"#,
        }
    }
}

fn app() -> Router {
    let mut table = RouteTable::new();
    table.register(Arc::new(Cached)).unwrap();
    table.register(Arc::new(Untagged)).unwrap();
    HttpServer::new(AppConfig::default(), table).router()
}

#[tokio::test]
async fn test_document_derives_headers_from_loader() {
    let response = app().oneshot(get("/cached")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "max-age=60"
    );
    assert!(body_text(response).await.contains("<p>cached data</p>"));
}

#[tokio::test]
async fn test_loader_data_carries_loader_headers() {
    let response = app()
        .oneshot(get("/cached?_data=routes/cached"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "max-age=60"
    );
    assert_eq!(body_text(response).await, "\"cached data\"");
}

#[tokio::test]
async fn test_post_without_action_is_method_not_allowed() {
    let response = app()
        .oneshot(post_form("/cached", "field1=stuff"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
}

#[tokio::test]
async fn test_missing_required_action_header_is_server_error() {
    let response = app()
        .oneshot(post_form("/untagged", "field1=stuff"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get("x-test").is_none());
    assert_eq!(body_text(response).await, "Internal Server Error");
}

#[tokio::test]
async fn test_action_data_skips_header_derivation() {
    let response = app()
        .oneshot(post_form("/untagged?_data=routes/untagged", "field1=stuff"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "\"done\"");
}

#[tokio::test]
async fn test_get_without_action_still_renders() {
    let response = app().oneshot(get("/untagged")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-test").is_none());
}
