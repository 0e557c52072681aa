//! Driving port for reading a user's location history.
//!
//! Inbound adapters call this port with the raw user identifier; validation
//! belongs to the use-case so every caller gets the same contract.

use async_trait::async_trait;

use crate::domain::{Error, HistoryOrder, LocationPoint, UserName};

/// Request for a user's ordered history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    /// Raw user identifier; blank values are rejected.
    pub user_name: String,
    /// Maximum number of points returned, applied after sorting.
    pub limit: Option<usize>,
    /// Requested ordering.
    pub order: HistoryOrder,
}

/// Driving port for history reads.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), geotracker::domain::Error> {
/// use geotracker::domain::HistoryOrder;
/// use geotracker::domain::ports::{
///     FixtureLocationHistoryQuery, HistoryRequest, LocationHistoryQuery,
/// };
///
/// let history = FixtureLocationHistoryQuery
///     .select_history(HistoryRequest {
///         user_name: "ana".to_owned(),
///         limit: Some(10),
///         order: HistoryOrder::Descending,
///     })
///     .await?;
/// assert!(history.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationHistoryQuery: Send + Sync {
    /// Fetch, sort and truncate the user's points.
    async fn select_history(&self, request: HistoryRequest) -> Result<Vec<LocationPoint>, Error>;
}

/// Fixture query with no recorded points.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLocationHistoryQuery;

#[async_trait]
impl LocationHistoryQuery for FixtureLocationHistoryQuery {
    async fn select_history(&self, request: HistoryRequest) -> Result<Vec<LocationPoint>, Error> {
        UserName::new(request.user_name).map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(Vec::new())
    }
}
