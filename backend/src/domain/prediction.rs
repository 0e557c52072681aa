//! Constant-velocity route forecasting.
//!
//! The forecast uses only the last two timed points of a history: their
//! coordinate and time differences are repeated `steps` times starting from
//! the most recent point.

use chrono::{DateTime, Utc};

use crate::domain::LocationPoint;

/// Number of points forecast when the caller does not ask for a count.
pub const DEFAULT_PREDICTION_STEPS: usize = 5;

/// Upper bound on forecast length accepted from callers.
pub const MAX_PREDICTION_STEPS: usize = 100;

/// Forecasting model used by the prediction use-case.
pub trait RoutePredictor: Send + Sync {
    /// Forecast `steps` future points from `history`.
    ///
    /// `history` may be in any order. Implementations return an empty vector
    /// when the history cannot support a forecast.
    fn predict(&self, history: &[LocationPoint], steps: usize) -> Vec<LocationPoint>;
}

/// Two-point linear extrapolation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearRoutePredictor;

impl RoutePredictor for LinearRoutePredictor {
    fn predict(&self, history: &[LocationPoint], steps: usize) -> Vec<LocationPoint> {
        predict_route(history, steps)
    }
}

/// Extrapolate `steps` points from the last two timed points of `history`.
///
/// Points without a parseable timestamp are ignored. Fewer than two timed
/// points yields an empty vector. Identical timestamps on the last two points
/// produce forecasts that all share the last timestamp.
///
/// # Examples
/// ```
/// use geotracker::domain::{LocationPoint, predict_route};
///
/// let history = vec![
///     LocationPoint::new(11.0, 21.0, "2024-01-01T00:01:00Z", "phone", "ana"),
///     LocationPoint::new(10.0, 20.0, "2024-01-01T00:00:00Z", "phone", "ana"),
/// ];
/// let forecast = predict_route(&history, 2);
/// assert_eq!(forecast.len(), 2);
/// assert_eq!(forecast[0].latitude(), 12.0);
/// assert_eq!(forecast[1].timestamp(), "2024-01-01T00:03:00Z");
/// ```
pub fn predict_route(history: &[LocationPoint], steps: usize) -> Vec<LocationPoint> {
    let mut timed: Vec<(DateTime<Utc>, &LocationPoint)> = history
        .iter()
        .filter_map(|point| point.instant().map(|instant| (instant, point)))
        .collect();
    timed.sort_by_key(|(instant, _)| *instant);

    let [.., (previous_at, previous), (last_at, last)] = timed.as_slice() else {
        return Vec::new();
    };

    let delta_latitude = last.latitude() - previous.latitude();
    let delta_longitude = last.longitude() - previous.longitude();
    let delta_millis = last_at
        .timestamp_millis()
        .saturating_sub(previous_at.timestamp_millis());

    let mut latitude = last.latitude();
    let mut longitude = last.longitude();
    let mut at_millis = last_at.timestamp_millis();
    let mut forecast = Vec::with_capacity(steps);
    for _ in 0..steps {
        at_millis = at_millis.saturating_add(delta_millis);
        latitude += delta_latitude;
        longitude += delta_longitude;
        forecast.push(LocationPoint::derived_from(
            last,
            latitude,
            longitude,
            instant_from_millis(at_millis),
        ));
    }
    forecast
}

fn instant_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
