//! Reqwest-backed broker adapter using the IoT data-plane REST shape.
//!
//! ```text
//! POST {base}/topics/{topic}?qos=0        body: report JSON
//! POST {base}/things/{thing}/shadow       body: {"state":{"reported":{..}}}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use crate::domain::ports::{LocationBroker, LocationBrokerError, PublishedLocation};
use crate::outbound::http_support::{
    HttpAdapterError, build_client, endpoint, parse_base_url, status_message, with_token,
};

/// Connection settings for [`HttpLocationBroker`].
#[derive(Debug, Clone)]
pub struct HttpBrokerSettings {
    /// Broker data-plane base URL.
    pub base_url: String,
    /// Topic location reports are published on.
    pub topic: String,
    /// Thing whose shadow receives the reported state.
    pub thing_name: String,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Broker reached over HTTP.
pub struct HttpLocationBroker {
    client: Client,
    publish_url: Url,
    shadow_url: Url,
    token: Option<String>,
}

impl HttpLocationBroker {
    /// Build an adapter for one topic and one thing.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the reqwest client
    /// cannot be constructed.
    pub fn new(settings: HttpBrokerSettings) -> Result<Self, HttpAdapterError> {
        let base = parse_base_url(&settings.base_url)?;
        let mut publish_url = endpoint(&base, &["topics", settings.topic.as_str()])?;
        publish_url.query_pairs_mut().append_pair("qos", "0");
        let shadow_url = endpoint(&base, &["things", settings.thing_name.as_str(), "shadow"])?;
        Ok(Self {
            client: build_client(settings.timeout)?,
            publish_url,
            shadow_url,
            token: settings.token,
        })
    }

    async fn post_json<T>(&self, url: &Url, body: &T) -> Result<(), LocationBrokerError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let request = self.client.post(url.clone()).json(body);
        let response = with_token(request, self.token.as_deref())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            debug!(url = %url, status = status.as_u16(), "broker accepted request");
            return Ok(());
        }
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, bytes.as_ref()))
    }
}

#[async_trait]
impl LocationBroker for HttpLocationBroker {
    async fn publish(&self, report: &PublishedLocation) -> Result<(), LocationBrokerError> {
        self.post_json(&self.publish_url, report).await
    }

    async fn update_shadow(&self, report: &PublishedLocation) -> Result<(), LocationBrokerError> {
        self.post_json(&self.shadow_url, &report.shadow_document())
            .await
    }
}

fn map_transport_error(error: reqwest::Error) -> LocationBrokerError {
    if error.is_timeout() {
        LocationBrokerError::timeout(error.to_string())
    } else {
        LocationBrokerError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LocationBrokerError {
    let message = status_message(status, body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            LocationBrokerError::timeout(message)
        }
        _ if status.is_client_error() => LocationBrokerError::rejected(message),
        _ => LocationBrokerError::transport(message),
    }
}
