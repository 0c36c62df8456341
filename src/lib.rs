//! Server-rendered route runtime, the `actions` route, and the `remix` CLI.

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod routing;
pub mod view;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
