//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed location entities and the use-cases built on
//! them. Types are immutable once constructed; serialisation contracts are
//! documented on each type.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - LocationPoint / UserName: observed positions and their owner key.
//! - HistoryOrder / LocationHistoryService: the fetch, sort, truncate pipeline.
//! - RoutePredictor / LinearRoutePredictor: constant-velocity forecasting.
//! - Services implementing the driving ports in [`ports`].

pub mod error;
pub mod history;
pub mod location;
pub mod ports;
pub mod prediction;
pub mod prediction_service;
pub mod publish_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::history::{HistoryOrder, HistoryOrderParseError, LocationHistoryService, order_points};
pub use self::location::{LocationPoint, UserName, UserNameValidationError, format_instant};
pub use self::prediction::{
    DEFAULT_PREDICTION_STEPS, LinearRoutePredictor, MAX_PREDICTION_STEPS, RoutePredictor,
    predict_route,
};
pub use self::prediction_service::{
    DEFAULT_HISTORY_WINDOW, MIN_HISTORY_WINDOW, PredictionSettings, RoutePredictionService,
};
pub use self::publish_service::{DEFAULT_DEVICE_ID, LocationPublishService, PublishSettings};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for domain use-cases.
///
/// # Examples
/// ```
/// use geotracker::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::invalid_request("userName is required"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
