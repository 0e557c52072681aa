//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLocationHistoryQuery, FixtureLocationPublishCommand, FixtureRoutePredictionQuery,
    LocationHistoryQuery, LocationPublishCommand, RoutePredictionQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use geotracker::domain::ports::{
///     FixtureLocationHistoryQuery, FixtureLocationPublishCommand, FixtureRoutePredictionQuery,
/// };
/// use geotracker::inbound::http::state::HttpState;
///
/// let state = HttpState::new(
///     Arc::new(FixtureLocationHistoryQuery),
///     Arc::new(FixtureRoutePredictionQuery),
///     Arc::new(FixtureLocationPublishCommand),
/// );
/// let _history = state.history.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub history: Arc<dyn LocationHistoryQuery>,
    pub prediction: Arc<dyn RoutePredictionQuery>,
    pub publish: Arc<dyn LocationPublishCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        history: Arc<dyn LocationHistoryQuery>,
        prediction: Arc<dyn RoutePredictionQuery>,
        publish: Arc<dyn LocationPublishCommand>,
    ) -> Self {
        Self {
            history,
            prediction,
            publish,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureLocationHistoryQuery),
            Arc::new(FixtureRoutePredictionQuery),
            Arc::new(FixtureLocationPublishCommand),
        )
    }
}
