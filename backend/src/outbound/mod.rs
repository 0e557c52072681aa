//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **store**: HTTP JSON client for the managed location table
//! - **broker**: HTTP client for the IoT data plane (topic publish, shadow)
//! - **memory**: in-process stand-ins used when no endpoint is configured
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no business logic.

pub mod broker;
mod http_support;
pub mod memory;
pub mod store;

pub use http_support::HttpAdapterError;
