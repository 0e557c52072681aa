//! Broker outbound adapters.

mod http_broker;

pub use http_broker::{HttpBrokerSettings, HttpLocationBroker};
