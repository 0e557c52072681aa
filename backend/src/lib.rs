//! Location tracking backend library.
//!
//! The crate follows a hexagonal layout:
//! - [`domain`] holds location primitives, the history selector, the route
//!   predictor and the ports they depend on;
//! - [`inbound`] exposes the HTTP adapter;
//! - [`outbound`] implements the store and broker ports;
//! - [`middleware`] carries request-scoped tracing.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
