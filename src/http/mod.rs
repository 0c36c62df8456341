//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, form decoding, `_data` query)
//!     → handlers.rs (loader / action / header derivation)
//!     → response.rs (HTML document or JSON data)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{FormSubmission, RequestIdGen, X_REQUEST_ID};
pub use server::HttpServer;
