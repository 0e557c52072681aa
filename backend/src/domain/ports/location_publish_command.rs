//! Driving port for ingesting device location reports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Error;

/// A location report as received from a device.
///
/// Coordinates are optional here so the use-case owns the "required field"
/// rule rather than the transport's deserialiser.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishLocationRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Observation time; the service clock is used when absent.
    pub timestamp: Option<DateTime<Utc>>,
    pub device_id: Option<String>,
    pub user_name: Option<String>,
}

/// Outcome returned to the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishLocationResponse {
    pub success: bool,
    pub message: String,
    pub shadow_updated: bool,
}

/// Driving port for location ingestion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationPublishCommand: Send + Sync {
    /// Validate and forward a report to the broker.
    async fn publish_location(
        &self,
        request: PublishLocationRequest,
    ) -> Result<PublishLocationResponse, Error>;
}

/// Fixture command that accepts any report with coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLocationPublishCommand;

#[async_trait]
impl LocationPublishCommand for FixtureLocationPublishCommand {
    async fn publish_location(
        &self,
        request: PublishLocationRequest,
    ) -> Result<PublishLocationResponse, Error> {
        if request.latitude.is_none() || request.longitude.is_none() {
            return Err(Error::invalid_request("latitude and longitude are required"));
        }
        Ok(PublishLocationResponse {
            success: true,
            message: "Location published".to_owned(),
            shadow_updated: false,
        })
    }
}
