//! Location ingestion use-case.
//!
//! Normalises a device report, publishes it on the broker topic and, when
//! enabled, records it as the device shadow's reported state.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    LocationBroker, LocationBrokerError, LocationPublishCommand, PublishLocationRequest,
    PublishLocationResponse, PublishedLocation,
};
use crate::domain::{Error, format_instant};

/// Device identifier applied to reports that do not name one.
pub const DEFAULT_DEVICE_ID: &str = "unknown-device";

/// Tunables for [`LocationPublishService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSettings {
    /// Write the report to the device shadow after publishing.
    pub update_shadow: bool,
    /// Fallback device identifier.
    pub default_device_id: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            update_shadow: true,
            default_device_id: DEFAULT_DEVICE_ID.to_owned(),
        }
    }
}

/// Publisher backed by a [`LocationBroker`].
///
/// # Examples
/// ```rust,no_run
/// # async fn example() -> Result<(), geotracker::domain::Error> {
/// use std::sync::Arc;
///
/// use geotracker::domain::ports::{
///     FixtureLocationBroker, LocationPublishCommand, PublishLocationRequest,
/// };
/// use geotracker::domain::{LocationPublishService, PublishSettings};
/// use mockable::DefaultClock;
///
/// let service = LocationPublishService::new(
///     Arc::new(FixtureLocationBroker),
///     Arc::new(DefaultClock),
///     PublishSettings::default(),
/// );
/// let response = service
///     .publish_location(PublishLocationRequest {
///         latitude: Some(-33.45),
///         longitude: Some(-70.66),
///         timestamp: None,
///         device_id: None,
///         user_name: Some("ana".to_owned()),
///     })
///     .await?;
/// assert!(response.success);
/// # Ok(())
/// # }
/// ```
pub struct LocationPublishService<B: ?Sized> {
    broker: Arc<B>,
    clock: Arc<dyn Clock>,
    settings: PublishSettings,
}

impl<B: ?Sized> LocationPublishService<B> {
    /// Create a publisher.
    pub fn new(broker: Arc<B>, clock: Arc<dyn Clock>, settings: PublishSettings) -> Self {
        Self {
            broker,
            clock,
            settings,
        }
    }

    fn normalise(&self, request: PublishLocationRequest) -> Result<PublishedLocation, Error> {
        let PublishLocationRequest {
            latitude,
            longitude,
            timestamp,
            device_id,
            user_name,
        } = request;

        let missing: Vec<&str> = [("latitude", latitude), ("longitude", longitude)]
            .into_iter()
            .filter_map(|(field, value)| value.is_none().then_some(field))
            .collect();
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(
                Error::invalid_request("latitude and longitude are required")
                    .with_details(json!({ "fields": missing, "code": "missing_field" })),
            );
        };

        let timestamp = timestamp.unwrap_or_else(|| self.clock.utc());
        let device_id = device_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| self.settings.default_device_id.clone());
        let user_name = user_name.filter(|name| !name.trim().is_empty());

        Ok(PublishedLocation {
            latitude,
            longitude,
            timestamp: format_instant(timestamp),
            device_id,
            user_name,
        })
    }
}

fn map_broker_error(message: &'static str, error: LocationBrokerError) -> Error {
    Error::dependency_unavailable(message, error)
}

#[async_trait]
impl<B> LocationPublishCommand for LocationPublishService<B>
where
    B: LocationBroker + ?Sized,
{
    async fn publish_location(
        &self,
        request: PublishLocationRequest,
    ) -> Result<PublishLocationResponse, Error> {
        let report = self.normalise(request)?;

        self.broker.publish(&report).await.map_err(|err| {
            warn!(device_id = %report.device_id, error = %err, "location publish failed");
            map_broker_error("failed to publish location", err)
        })?;

        if !self.settings.update_shadow {
            info!(device_id = %report.device_id, "location published");
            return Ok(PublishLocationResponse {
                success: true,
                message: "Location published".to_owned(),
                shadow_updated: false,
            });
        }

        self.broker.update_shadow(&report).await.map_err(|err| {
            warn!(device_id = %report.device_id, error = %err, "device shadow update failed");
            map_broker_error("failed to update device shadow", err)
        })?;

        info!(device_id = %report.device_id, "location published and shadow updated");
        Ok(PublishLocationResponse {
            success: true,
            message: "Location published and device shadow updated".to_owned(),
            shadow_updated: true,
        })
    }
}
