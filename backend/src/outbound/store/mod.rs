//! Location store outbound adapters.

mod dto;
mod http_store;

pub use http_store::{HttpLocationStore, HttpStoreSettings};
