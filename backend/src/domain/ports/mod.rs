//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are called by inbound adapters;
//! driven ports (`LocationStore`, `LocationBroker`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod location_broker;
mod location_history_query;
mod location_publish_command;
mod location_store;
mod route_prediction_query;

#[cfg(test)]
pub use location_broker::MockLocationBroker;
pub use location_broker::{
    FixtureLocationBroker, LocationBroker, LocationBrokerError, PublishedLocation,
};
#[cfg(test)]
pub use location_history_query::MockLocationHistoryQuery;
pub use location_history_query::{
    FixtureLocationHistoryQuery, HistoryRequest, LocationHistoryQuery,
};
#[cfg(test)]
pub use location_publish_command::MockLocationPublishCommand;
pub use location_publish_command::{
    FixtureLocationPublishCommand, LocationPublishCommand, PublishLocationRequest,
    PublishLocationResponse,
};
#[cfg(test)]
pub use location_store::MockLocationStore;
pub use location_store::{FixtureLocationStore, LocationStore, LocationStoreError};
#[cfg(test)]
pub use route_prediction_query::MockRoutePredictionQuery;
pub use route_prediction_query::{
    FixtureRoutePredictionQuery, PredictRouteRequest, RoutePredictionQuery,
};
