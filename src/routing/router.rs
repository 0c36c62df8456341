//! Route registry.
//!
//! Holds the app's route modules in registration order, compiles their
//! templates and mounts them on an axum `Router`. Ids and paths must be unique.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use serde::Serialize;
use thiserror::Error;

use crate::http::handlers::{self, RouteHandle};
use crate::routing::{Exports, RouteModule};
use crate::view::Templates;

/// Error raised when a route cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("duplicate route id `{0}`")]
    DuplicateId(String),

    #[error("duplicate route path `{0}`")]
    DuplicatePath(String),

    #[error("route path `{0}` must start with `/`")]
    InvalidPath(String),

    #[error("template for route `{route}` is invalid: {message}")]
    Template { route: String, message: String },
}

/// Manifest entry describing one registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub id: String,
    pub path: String,
    pub exports: Exports,
}

/// Ordered collection of route modules.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    routes: Vec<Arc<dyn RouteModule>>,
    templates: Templates,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route, rejecting duplicate ids and paths.
    pub fn register(&mut self, route: Arc<dyn RouteModule>) -> Result<(), RoutingError> {
        let path = route.path();
        if !path.starts_with('/') {
            return Err(RoutingError::InvalidPath(path.to_string()));
        }
        for existing in &self.routes {
            if existing.id() == route.id() {
                return Err(RoutingError::DuplicateId(route.id().to_string()));
            }
            if existing.path() == path {
                return Err(RoutingError::DuplicatePath(path.to_string()));
            }
        }

        self.templates
            .add(route.template())
            .map_err(|e| RoutingError::Template {
                route: route.id().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(route = %route.id(), path = %path, "Route registered");
        self.routes.push(route);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Describe every route, in registration order.
    pub fn manifest(&self) -> Vec<RouteEntry> {
        self.routes
            .iter()
            .map(|route| RouteEntry {
                id: route.id().to_string(),
                path: route.path().to_string(),
                exports: route.exports(),
            })
            .collect()
    }

    /// Mount every route: GET serves the loader, POST runs the action.
    pub fn into_router(self) -> Router {
        let templates = Arc::new(self.templates);
        self.routes.into_iter().fold(Router::new(), |router, route| {
            let path = route.path().to_string();
            let handle = RouteHandle {
                route,
                templates: Arc::clone(&templates),
            };
            router.route(
                &path,
                get(handlers::load)
                    .post(handlers::submit)
                    .with_state(handle),
            )
        })
    }
}
