//! App route modules.
//!
//! Every route the app serves is registered in [`app_routes`].

pub mod actions;

use std::sync::Arc;

use crate::routing::{RouteTable, RoutingError};

pub use actions::ActionsRoute;

/// Route table for the app, in registration order.
pub fn app_routes() -> Result<RouteTable, RoutingError> {
    let mut table = RouteTable::new();
    table.register(Arc::new(ActionsRoute))?;
    Ok(table)
}
