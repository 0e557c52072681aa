//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use geotracker::config::AppSettings;
use geotracker::domain::{PredictionSettings, PublishSettings};
use geotracker::outbound::broker::HttpBrokerSettings;
use geotracker::outbound::store::HttpStoreSettings;

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Option<HttpStoreSettings>,
    pub(crate) broker: Option<HttpBrokerSettings>,
    pub(crate) topic: String,
    pub(crate) thing_name: String,
    pub(crate) prediction: PredictionSettings,
    pub(crate) publish: PublishSettings,
}

impl ServerConfig {
    /// Resolve loaded settings, applying defaults.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        let timeout = settings.request_timeout();
        let store = settings.store_url().map(|base_url| HttpStoreSettings {
            base_url: base_url.to_owned(),
            table: settings.store_table().to_owned(),
            scan_limit: settings.store_scan_limit(),
            token: settings.store_token().map(str::to_owned),
            timeout,
        });
        let broker = settings.broker_url().map(|base_url| HttpBrokerSettings {
            base_url: base_url.to_owned(),
            topic: settings.broker_topic().to_owned(),
            thing_name: settings.broker_thing_name().to_owned(),
            token: settings.broker_token().map(str::to_owned),
            timeout,
        });
        Self {
            bind_addr: settings.bind_addr(),
            store,
            broker,
            topic: settings.broker_topic().to_owned(),
            thing_name: settings.broker_thing_name().to_owned(),
            prediction: settings.prediction(),
            publish: settings.publish(),
        }
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
