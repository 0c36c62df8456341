//! Explicit header propagation.
//!
//! A response never inherits an action's headers on its own; each route picks
//! the names it wants copied and this module copies them verbatim.

use axum::http::{HeaderMap, HeaderName};
use thiserror::Error;

/// A header the route requires was not present on the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("required header `{0}` missing from action response")]
    Missing(HeaderName),
}

/// Copy every header in `names` from `source`.
///
/// Fails on the first name that `source` lacks. All values of a repeated
/// header are copied.
pub fn propagate(source: &HeaderMap, names: &[HeaderName]) -> Result<HeaderMap, HeaderError> {
    let mut derived = HeaderMap::new();
    for name in names {
        let mut values = source.get_all(name).iter().peekable();
        if values.peek().is_none() {
            return Err(HeaderError::Missing(name.clone()));
        }
        for value in values {
            derived.append(name.clone(), value.clone());
        }
    }
    Ok(derived)
}
