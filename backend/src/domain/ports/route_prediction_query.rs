//! Driving port for forecasting a user's next positions.

use async_trait::async_trait;

use crate::domain::{Error, LocationPoint, UserName};

/// Request for a route forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRouteRequest {
    /// Raw user identifier; blank values are rejected.
    pub user_name: String,
    /// Number of points to extrapolate; the configured default when absent.
    pub steps: Option<usize>,
}

/// Driving port for route forecasts.
///
/// An empty result means there is not enough history yet; it is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutePredictionQuery: Send + Sync {
    /// Forecast future points from the user's most recent history.
    async fn predict_route(
        &self,
        request: PredictRouteRequest,
    ) -> Result<Vec<LocationPoint>, Error>;
}

/// Fixture query that never has enough history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoutePredictionQuery;

#[async_trait]
impl RoutePredictionQuery for FixtureRoutePredictionQuery {
    async fn predict_route(
        &self,
        request: PredictRouteRequest,
    ) -> Result<Vec<LocationPoint>, Error> {
        UserName::new(request.user_name).map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(Vec::new())
    }
}
