//! Route request handlers.
//!
//! `load` answers GET (document or loader data), `submit` answers POST
//! (document after running the action, or the action's data).

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;

use crate::error::RouteError;
use crate::http::request::{request_id, DataQuery, FormSubmission};
use crate::http::response;
use crate::routing::{HeadersArgs, LoaderResult, RouteModule};
use crate::view::{Submission, Templates, ViewState};

/// Route module injected into its handlers, with the compiled templates.
#[derive(Debug, Clone)]
pub struct RouteHandle {
    pub route: Arc<dyn RouteModule>,
    pub templates: Arc<Templates>,
}

/// GET: render the document, or return loader data for `?_data=<id>`.
pub async fn load(
    State(RouteHandle { route, templates }): State<RouteHandle>,
    Query(query): Query<DataQuery>,
    headers: HeaderMap,
) -> Result<Response, RouteError> {
    let request_id = request_id(&headers);

    if let Some(target) = query.data.as_deref() {
        check_data_target(route.as_ref(), target)?;
        let loaded = route
            .loader()
            .ok_or_else(|| RouteError::NoLoader(route.id().to_string()))?;
        tracing::debug!(request_id = %request_id, route = %route.id(), "Serving loader data");
        return Ok(response::data(loaded.data(), loaded.headers().clone()));
    }

    let loaded = route.loader();
    let derived = derive_headers(route.as_ref(), request_id, loaded.as_ref(), None)?;

    tracing::debug!(request_id = %request_id, route = %route.id(), "Rendering document");
    let state = ViewState {
        action_data: None,
        loader_data: loaded.as_ref().map(LoaderResult::data),
        submission: Submission::Idle,
    };
    let html = render(&templates, route.as_ref(), request_id, &state)?;
    Ok(response::document(html, derived))
}

/// POST: run the action, then render the document or return the action data.
pub async fn submit(
    State(RouteHandle { route, templates }): State<RouteHandle>,
    Query(query): Query<DataQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RouteError> {
    let request_id = request_id(&headers);

    if let Some(target) = query.data.as_deref() {
        check_data_target(route.as_ref(), target)?;
    }

    let submission = FormSubmission::from_urlencoded(&body);
    let action = route
        .action(&submission)
        .ok_or_else(|| RouteError::NoAction(route.id().to_string()))?;

    tracing::info!(
        request_id = %request_id,
        route = %route.id(),
        fields = submission.len(),
        "Action completed"
    );

    if query.data.is_some() {
        return Ok(response::data(action.body(), action.headers().clone()));
    }

    // Loaders run again after an action so the document shows fresh data.
    let loaded = route.loader();
    let derived = derive_headers(
        route.as_ref(),
        request_id,
        loaded.as_ref(),
        Some(action.headers()),
    )?;

    let state = ViewState {
        action_data: Some(action.body()),
        loader_data: loaded.as_ref().map(LoaderResult::data),
        submission: Submission::Idle,
    };
    let html = render(&templates, route.as_ref(), request_id, &state)?;
    Ok(response::document(html, derived))
}

fn check_data_target(route: &dyn RouteModule, target: &str) -> Result<(), RouteError> {
    if route.id() == target {
        Ok(())
    } else {
        Err(RouteError::DataRouteMismatch {
            requested: target.to_string(),
        })
    }
}

fn render(
    templates: &Templates,
    route: &dyn RouteModule,
    request_id: &str,
    state: &ViewState<'_>,
) -> Result<String, RouteError> {
    templates.render(route, state).map_err(|e| {
        tracing::error!(
            request_id = %request_id,
            route = %route.id(),
            error = %e,
            "Rendering failed"
        );
        RouteError::from(e)
    })
}

fn derive_headers(
    route: &dyn RouteModule,
    request_id: &str,
    loaded: Option<&LoaderResult>,
    action_headers: Option<&HeaderMap>,
) -> Result<HeaderMap, RouteError> {
    let empty = HeaderMap::new();
    let args = HeadersArgs {
        loader_headers: loaded.map(LoaderResult::headers).unwrap_or(&empty),
        action_headers,
    };
    route.headers(&args).map_err(|e| {
        tracing::error!(
            request_id = %request_id,
            route = %route.id(),
            error = %e,
            "Header derivation failed"
        );
        RouteError::from(e)
    })
}
