//! Route prediction use-case.
//!
//! Reads the most recent window of a user's history and hands it to the
//! configured [`RoutePredictor`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::history::parse_user_name;
use crate::domain::ports::{LocationStore, PredictRouteRequest, RoutePredictionQuery};
use crate::domain::{
    DEFAULT_PREDICTION_STEPS, Error, HistoryOrder, LinearRoutePredictor, LocationHistoryService,
    LocationPoint, MAX_PREDICTION_STEPS, RoutePredictor,
};

/// Default number of recent points read before forecasting.
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Smallest window that still yields a forecast; the predictor needs two points.
pub const MIN_HISTORY_WINDOW: usize = 2;

/// Tunables for [`RoutePredictionService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionSettings {
    /// Forecast length used when the request does not name one.
    pub default_steps: usize,
    /// How many of the most recent points feed the predictor. Values below
    /// [`MIN_HISTORY_WINDOW`] are raised to it.
    pub history_window: usize,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            default_steps: DEFAULT_PREDICTION_STEPS,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

/// Prediction service composed of a history selector and a predictor.
pub struct RoutePredictionService<S: ?Sized> {
    history: LocationHistoryService<S>,
    predictor: Arc<dyn RoutePredictor>,
    settings: PredictionSettings,
}

impl<S: ?Sized> RoutePredictionService<S> {
    /// Create a service using the linear predictor.
    pub fn new(history: LocationHistoryService<S>, settings: PredictionSettings) -> Self {
        Self::with_predictor(history, Arc::new(LinearRoutePredictor), settings)
    }

    /// Create a service with an explicit predictor.
    pub fn with_predictor(
        history: LocationHistoryService<S>,
        predictor: Arc<dyn RoutePredictor>,
        settings: PredictionSettings,
    ) -> Self {
        Self {
            history,
            predictor,
            settings,
        }
    }

    fn resolve_steps(&self, requested: Option<usize>) -> Result<usize, Error> {
        match requested {
            Some(0) => Err(Error::invalid_request("steps must be at least 1").with_details(
                json!({ "field": "steps", "code": "out_of_range" }),
            )),
            Some(steps) => Ok(steps.min(MAX_PREDICTION_STEPS)),
            None => Ok(self.settings.default_steps.clamp(1, MAX_PREDICTION_STEPS)),
        }
    }

    fn history_window(&self) -> usize {
        self.settings.history_window.max(MIN_HISTORY_WINDOW)
    }
}

#[async_trait]
impl<S> RoutePredictionQuery for RoutePredictionService<S>
where
    S: LocationStore + ?Sized,
{
    async fn predict_route(
        &self,
        request: PredictRouteRequest,
    ) -> Result<Vec<LocationPoint>, Error> {
        let user_name = parse_user_name(request.user_name)?;
        let steps = self.resolve_steps(request.steps)?;

        let window = self
            .history
            .select(
                &user_name,
                Some(self.history_window()),
                HistoryOrder::Descending,
            )
            .await?;

        let forecast = self.predictor.predict(&window, steps);
        debug!(
            user_name = %user_name,
            window = window.len(),
            steps,
            predicted = forecast.len(),
            "route predicted"
        );
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{LocationStoreError, MockLocationStore};

    fn recent_history() -> Vec<LocationPoint> {
        vec![
            LocationPoint::new(11.0, 21.0, "2024-01-01T00:01:00Z", "device-a", "ana"),
            LocationPoint::new(0.0, 0.0, "2023-01-01T00:00:00Z", "device-a", "ana"),
            LocationPoint::new(10.0, 20.0, "2024-01-01T00:00:00Z", "device-a", "ana"),
        ]
    }

    fn service_with(
        store: MockLocationStore,
        settings: PredictionSettings,
    ) -> RoutePredictionService<MockLocationStore> {
        RoutePredictionService::new(LocationHistoryService::new(Arc::new(store)), settings)
    }

    fn request(user_name: &str, steps: Option<usize>) -> PredictRouteRequest {
        PredictRouteRequest {
            user_name: user_name.to_owned(),
            steps,
        }
    }

    #[tokio::test]
    async fn predicts_from_the_most_recent_points() {
        let mut store = MockLocationStore::new();
        store
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Ok(recent_history()));

        let service = service_with(store, PredictionSettings::default());
        let forecast = service
            .predict_route(request("ana", None))
            .await
            .expect("prediction succeeds");

        assert_eq!(forecast.len(), DEFAULT_PREDICTION_STEPS);
        assert_eq!(forecast[0].latitude(), 12.0);
        assert_eq!(forecast[0].timestamp(), "2024-01-01T00:02:00Z");
    }

    #[tokio::test]
    async fn window_keeps_the_latest_points_only() {
        let mut store = MockLocationStore::new();
        store
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Ok(recent_history()));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        struct Recording(Arc<Mutex<Vec<LocationPoint>>>);
        impl RoutePredictor for Recording {
            fn predict(&self, history: &[LocationPoint], _steps: usize) -> Vec<LocationPoint> {
                if let Ok(mut guard) = self.0.lock() {
                    guard.extend_from_slice(history);
                }
                Vec::new()
            }
        }

        let service = RoutePredictionService::with_predictor(
            LocationHistoryService::new(Arc::new(store)),
            Arc::new(Recording(recorder)),
            PredictionSettings {
                default_steps: 3,
                history_window: 2,
            },
        );
        service
            .predict_route(request("ana", None))
            .await
            .expect("prediction succeeds");

        let seen = seen.lock().expect("recorder lock");
        let stamps: Vec<&str> = seen.iter().map(LocationPoint::timestamp).collect();
        assert_eq!(stamps, vec!["2024-01-01T00:01:00Z", "2024-01-01T00:00:00Z"]);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::one(1)]
    #[tokio::test]
    async fn undersized_window_still_reads_two_points(#[case] history_window: usize) {
        let mut store = MockLocationStore::new();
        store
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Ok(recent_history()));

        let forecast = service_with(
            store,
            PredictionSettings {
                default_steps: 2,
                history_window,
            },
        )
        .predict_route(request("ana", None))
        .await
        .expect("prediction succeeds");

        assert_eq!(forecast.len(), 2);
        assert_eq!(forecast[0].latitude(), 12.0);
        assert_eq!(forecast[0].longitude(), 22.0);
        assert_eq!(forecast[0].timestamp(), "2024-01-01T00:02:00Z");
    }

    #[tokio::test]
    async fn sparse_history_is_an_empty_forecast() {
        let mut store = MockLocationStore::new();
        store.expect_find_by_user().times(1).return_once(|_| {
            Ok(vec![LocationPoint::new(1.0, 1.0, "2024-01-01T00:00:00Z", "d", "ana")])
        });

        let forecast = service_with(store, PredictionSettings::default())
            .predict_route(request("ana", Some(3)))
            .await
            .expect("prediction succeeds");
        assert!(forecast.is_empty());
    }

    #[rstest]
    #[case(Some(250), MAX_PREDICTION_STEPS)]
    #[case(Some(2), 2)]
    #[case(None, 4)]
    #[tokio::test]
    async fn steps_are_defaulted_and_capped(
        #[case] requested: Option<usize>,
        #[case] expected: usize,
    ) {
        let mut store = MockLocationStore::new();
        store
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Ok(recent_history()));

        let forecast = service_with(
            store,
            PredictionSettings {
                default_steps: 4,
                history_window: 20,
            },
        )
        .predict_route(request("ana", requested))
        .await
        .expect("prediction succeeds");
        assert_eq!(forecast.len(), expected);
    }

    #[tokio::test]
    async fn zero_steps_is_rejected() {
        let mut store = MockLocationStore::new();
        store.expect_find_by_user().times(0);

        let err = service_with(store, PredictionSettings::default())
            .predict_route(request("ana", Some(0)))
            .await
            .expect_err("zero steps rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn blank_user_is_rejected() {
        let mut store = MockLocationStore::new();
        store.expect_find_by_user().times(0);

        let err = service_with(store, PredictionSettings::default())
            .predict_route(request("", None))
            .await
            .expect_err("blank user rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let mut store = MockLocationStore::new();
        store
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Err(LocationStoreError::query("status 503")));

        let err = service_with(store, PredictionSettings::default())
            .predict_route(request("ana", None))
            .await
            .expect_err("store failure surfaces");
        assert_eq!(err.code(), ErrorCode::DependencyUnavailable);
    }
}
