//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `GEOTRACKER_*` environment variables and an
//! optional configuration file. Every field is optional; accessors apply the
//! defaults. Leaving a dependency URL unset selects the in-memory adapter.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::prediction_service::DEFAULT_HISTORY_WINDOW;
use crate::domain::publish_service::DEFAULT_DEVICE_ID;
use crate::domain::{DEFAULT_PREDICTION_STEPS, PredictionSettings, PublishSettings};

const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_STORE_TABLE: &str = "GPS_Locations";
const DEFAULT_STORE_SCAN_LIMIT: usize = 100;
const DEFAULT_BROKER_TOPIC: &str = "devices/GPS/location";
const DEFAULT_BROKER_THING_NAME: &str = "GPS";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Top-level service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GEOTRACKER")]
pub struct AppSettings {
    /// Address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Base URL of the location store; unset uses the in-memory store.
    pub store_url: Option<String>,
    /// Table holding location records.
    pub store_table: Option<String>,
    /// Maximum records a single store scan returns.
    pub store_scan_limit: Option<usize>,
    /// Bearer token sent to the store.
    pub store_token: Option<String>,
    /// Base URL of the broker; unset uses the in-memory broker.
    pub broker_url: Option<String>,
    /// Topic location reports are published on.
    pub broker_topic: Option<String>,
    /// Thing whose shadow receives the reported state.
    pub broker_thing_name: Option<String>,
    /// Publish to the topic only, leaving the device shadow untouched.
    #[ortho_config(default = false)]
    pub broker_skip_shadow: bool,
    /// Bearer token sent to the broker.
    pub broker_token: Option<String>,
    /// Timeout applied to every outbound request.
    pub request_timeout_secs: Option<u64>,
    /// Forecast length used when a request does not specify `steps`.
    pub prediction_steps: Option<usize>,
    /// Number of recent points read before forecasting.
    pub prediction_history_window: Option<usize>,
    /// Device identifier applied to reports without one.
    pub default_device_id: Option<String>,
}

impl AppSettings {
    /// Listen address, `0.0.0.0:8080` by default.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            DEFAULT_BIND_PORT,
        )))
    }

    /// Store base URL; `None` selects the in-memory store.
    pub fn store_url(&self) -> Option<&str> {
        non_blank(self.store_url.as_deref())
    }

    pub fn store_table(&self) -> &str {
        non_blank(self.store_table.as_deref()).unwrap_or(DEFAULT_STORE_TABLE)
    }

    pub fn store_scan_limit(&self) -> usize {
        self.store_scan_limit.unwrap_or(DEFAULT_STORE_SCAN_LIMIT)
    }

    /// Bearer token for the store, if any.
    pub fn store_token(&self) -> Option<&str> {
        non_blank(self.store_token.as_deref())
    }

    /// Broker base URL; `None` selects the in-memory broker.
    pub fn broker_url(&self) -> Option<&str> {
        non_blank(self.broker_url.as_deref())
    }

    pub fn broker_topic(&self) -> &str {
        non_blank(self.broker_topic.as_deref()).unwrap_or(DEFAULT_BROKER_TOPIC)
    }

    pub fn broker_thing_name(&self) -> &str {
        non_blank(self.broker_thing_name.as_deref()).unwrap_or(DEFAULT_BROKER_THING_NAME)
    }

    /// Bearer token for the broker, if any.
    pub fn broker_token(&self) -> Option<&str> {
        non_blank(self.broker_token.as_deref())
    }

    /// Timeout applied to each outbound request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Prediction tunables with defaults applied.
    pub fn prediction(&self) -> PredictionSettings {
        PredictionSettings {
            default_steps: self.prediction_steps.unwrap_or(DEFAULT_PREDICTION_STEPS),
            history_window: self
                .prediction_history_window
                .unwrap_or(DEFAULT_HISTORY_WINDOW),
        }
    }

    /// Publish tunables with defaults applied.
    pub fn publish(&self) -> PublishSettings {
        PublishSettings {
            update_shadow: !self.broker_skip_shadow,
            default_device_id: non_blank(self.default_device_id.as_deref())
                .unwrap_or(DEFAULT_DEVICE_ID)
                .to_owned(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}
