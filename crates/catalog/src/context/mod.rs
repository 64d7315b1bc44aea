//! Request-scoped context module.
//!
//! Provides the `RequestContext` extractor that bundles request-scoped state
//! to complement application-scoped `AppState`.

mod extractor;
mod types;

pub use extractor::extract_request_id;
pub use types::{RequestContext, RequestId};
