//! Builders wiring outbound adapters into the HTTP state.
//!
//! Real HTTP adapters are used for every configured endpoint; anything left
//! unset falls back to the in-memory adapters.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use geotracker::domain::ports::{LocationBroker, LocationStore};
use geotracker::domain::{LocationHistoryService, LocationPublishService, RoutePredictionService};
use geotracker::inbound::http::state::HttpState;
use geotracker::outbound::HttpAdapterError;
use geotracker::outbound::broker::HttpLocationBroker;
use geotracker::outbound::memory::{InMemoryLocationBroker, InMemoryLocationStore};
use geotracker::outbound::store::HttpLocationStore;

use super::ServerConfig;

fn build_store(
    config: &ServerConfig,
    memory: &Arc<InMemoryLocationStore>,
) -> Result<Arc<dyn LocationStore>, HttpAdapterError> {
    match &config.store {
        Some(settings) => {
            info!(url = %settings.base_url, table = %settings.table, "using HTTP location store");
            Ok(Arc::new(HttpLocationStore::new(settings.clone())?))
        }
        None => {
            info!("no store URL configured; using in-memory location store");
            Ok(Arc::clone(memory) as Arc<dyn LocationStore>)
        }
    }
}

fn build_broker(
    config: &ServerConfig,
    memory: Arc<InMemoryLocationStore>,
) -> Result<Arc<dyn LocationBroker>, HttpAdapterError> {
    match &config.broker {
        Some(settings) => {
            info!(url = %settings.base_url, topic = %settings.topic, "using HTTP broker");
            Ok(Arc::new(HttpLocationBroker::new(settings.clone())?))
        }
        None => {
            if config.store.is_some() {
                warn!("in-memory broker records reports that the HTTP store will not see");
            }
            info!("no broker URL configured; using in-memory broker");
            Ok(Arc::new(InMemoryLocationBroker::new(
                memory,
                config.topic.clone(),
                config.thing_name.clone(),
            )))
        }
    }
}

/// Build the handler state from configuration.
///
/// # Errors
/// Returns [`HttpAdapterError`] when a configured endpoint is invalid.
pub(super) fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, HttpAdapterError> {
    let memory = Arc::new(InMemoryLocationStore::new());
    let store = build_store(config, &memory)?;
    let broker = build_broker(config, memory)?;

    let history = LocationHistoryService::new(store);
    let prediction = RoutePredictionService::new(history.clone(), config.prediction);
    let publish = LocationPublishService::new(broker, clock, config.publish.clone());

    Ok(HttpState::new(
        Arc::new(history),
        Arc::new(prediction),
        Arc::new(publish),
    ))
}
