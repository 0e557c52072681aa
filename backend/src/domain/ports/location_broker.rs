//! Driven port for the managed message broker.
//!
//! Two operations are exposed: publishing a report on the location topic and
//! overwriting the reported state of the device shadow.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use super::define_port_error;
use crate::domain::LocationPoint;

/// A normalised location report ready to be published.
///
/// `userName` is omitted from the payload when the reporter did not send one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedLocation {
    /// Decimal degrees, passed through unvalidated.
    pub latitude: f64,
    /// Decimal degrees, passed through unvalidated.
    pub longitude: f64,
    /// RFC 3339 in UTC, as produced by [`format_instant`](crate::domain::format_instant).
    pub timestamp: String,
    /// Reporting device, defaulted when the request omits it.
    pub device_id: String,
    /// Owner of the report; anonymous reports are never stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl PublishedLocation {
    /// The report as a stored point, when it is attributable to a user.
    pub fn to_point(&self) -> Option<LocationPoint> {
        self.user_name.as_ref().map(|user_name| {
            LocationPoint::new(
                self.latitude,
                self.longitude,
                self.timestamp.clone(),
                self.device_id.clone(),
                user_name.clone(),
            )
        })
    }

    /// Shadow document recording this report as the device's reported state.
    ///
    /// # Examples
    /// ```
    /// use geotracker::domain::ports::PublishedLocation;
    ///
    /// let report = PublishedLocation {
    ///     latitude: 1.0,
    ///     longitude: 2.0,
    ///     timestamp: "2024-01-01T00:00:00Z".to_owned(),
    ///     device_id: "phone".to_owned(),
    ///     user_name: None,
    /// };
    /// let doc = report.shadow_document();
    /// assert_eq!(doc["state"]["reported"]["deviceId"], "phone");
    /// ```
    pub fn shadow_document(&self) -> Value {
        json!({
            "state": {
                "reported": {
                    "latitude": self.latitude,
                    "longitude": self.longitude,
                    "timestamp": self.timestamp,
                    "deviceId": self.device_id,
                }
            }
        })
    }
}

define_port_error! {
    /// Errors surfaced by broker adapters.
    pub enum LocationBrokerError {
        /// Network transport failed before a response arrived.
        Transport => "broker transport failed: {message}",
        /// The broker did not answer in time.
        Timeout => "broker timed out: {message}",
        /// The broker refused the request (auth, throttling, bad topic).
        Rejected => "broker rejected request: {message}",
    }
}

/// Outbound messaging capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationBroker: Send + Sync {
    /// Publish a report on the location topic.
    async fn publish(&self, report: &PublishedLocation) -> Result<(), LocationBrokerError>;

    /// Replace the device shadow's reported state with `report`.
    async fn update_shadow(&self, report: &PublishedLocation) -> Result<(), LocationBrokerError>;
}

/// Broker that accepts and discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLocationBroker;

#[async_trait]
impl LocationBroker for FixtureLocationBroker {
    async fn publish(&self, _report: &PublishedLocation) -> Result<(), LocationBrokerError> {
        Ok(())
    }

    async fn update_shadow(&self, _report: &PublishedLocation) -> Result<(), LocationBrokerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn report(user_name: Option<&str>) -> PublishedLocation {
        PublishedLocation {
            latitude: -33.4,
            longitude: -70.6,
            timestamp: "2024-01-01T00:00:00Z".to_owned(),
            device_id: "phone-1".to_owned(),
            user_name: user_name.map(str::to_owned),
        }
    }

    #[rstest]
    fn payload_omits_missing_user_name() {
        let value = serde_json::to_value(report(None)).expect("serialises");
        assert!(value.get("userName").is_none());
        assert_eq!(value["deviceId"], "phone-1");
    }

    #[rstest]
    fn reports_without_user_do_not_become_points() {
        assert!(report(None).to_point().is_none());
        let point = report(Some("ana")).to_point().expect("attributable report");
        assert_eq!(point.user_name(), "ana");
    }

    #[rstest]
    fn shadow_document_excludes_user_name() {
        let doc = report(Some("ana")).shadow_document();
        assert!(doc["state"]["reported"].get("userName").is_none());
        assert_eq!(doc["state"]["reported"]["latitude"], -33.4);
    }
}
