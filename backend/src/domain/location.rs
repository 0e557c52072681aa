//! Location primitives shared by the history, prediction and publish paths.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserName::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserNameValidationError {
    /// The identifier was empty or whitespace only.
    #[error("userName must not be empty")]
    Blank,
}

/// Identifier of the user owning a set of location points.
///
/// Opaque grouping key: only blankness is validated.
///
/// # Examples
/// ```
/// use geotracker::domain::UserName;
///
/// let name = UserName::new("ana").expect("valid user name");
/// assert_eq!(name.as_str(), "ana");
/// assert!(UserName::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and wrap a user identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserNameValidationError::Blank);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// A single observed (or extrapolated) position.
///
/// Serialises with the camelCase field names used by the store records and
/// the browser client. Coordinates are never range checked; the timestamp is
/// kept verbatim and only parsed when ordering or extrapolating.
///
/// # Examples
/// ```
/// use geotracker::domain::LocationPoint;
///
/// let point = LocationPoint::new(10.0, 20.0, "2024-01-01T00:00:00Z", "phone-1", "ana");
/// assert_eq!(point.latitude(), 10.0);
/// assert!(point.instant().is_some());
///
/// let json = serde_json::to_value(&point).expect("serialises");
/// assert_eq!(json["deviceId"], "phone-1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPoint {
    latitude: f64,
    longitude: f64,
    timestamp: String,
    device_id: String,
    user_name: String,
}

impl LocationPoint {
    /// Build a point from its raw fields.
    pub fn new(
        latitude: f64,
        longitude: f64,
        timestamp: impl Into<String>,
        device_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: timestamp.into(),
            device_id: device_id.into(),
            user_name: user_name.into(),
        }
    }

    /// Build a point at `instant` that inherits device and user from `origin`.
    pub fn derived_from(
        origin: &Self,
        latitude: f64,
        longitude: f64,
        instant: DateTime<Utc>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: format_instant(instant),
            device_id: origin.device_id.clone(),
            user_name: origin.user_name.clone(),
        }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Timestamp exactly as recorded.
    pub fn timestamp(&self) -> &str {
        self.timestamp.as_str()
    }

    /// Reporting device identifier.
    pub fn device_id(&self) -> &str {
        self.device_id.as_str()
    }

    /// Owning user identifier.
    pub fn user_name(&self) -> &str {
        self.user_name.as_str()
    }

    /// Parsed observation instant, `None` when the timestamp is unreadable.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.timestamp)
    }
}

/// Parse an ISO-8601 instant.
///
/// Accepts RFC 3339 with any offset (normalised to UTC). Offset-less date-times
/// and bare dates are read as UTC.
///
/// # Examples
/// ```
/// use geotracker::domain::location::parse_instant;
///
/// let a = parse_instant("2024-01-01T01:00:00+01:00").expect("rfc3339");
/// let b = parse_instant("2024-01-01T00:00:00").expect("naive");
/// assert_eq!(a, b);
/// assert!(parse_instant("yesterday").is_none());
/// ```
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format an instant as RFC 3339 UTC with a `Z` suffix.
///
/// Fractional seconds appear only when non-zero.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use geotracker::domain::format_instant;
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 2, 0).single().expect("valid");
/// assert_eq!(format_instant(instant), "2024-01-01T00:02:00Z");
/// ```
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
