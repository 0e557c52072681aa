//! History selection: fetch unordered points, sort them, then truncate.
//!
//! The store gives no ordering guarantee, so the stages always run in this
//! order. Truncating before sorting would expose whatever order the store
//! happened to return.

use std::cmp::Reverse;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{HistoryRequest, LocationHistoryQuery, LocationStore, LocationStoreError};
use crate::domain::{Error, LocationPoint, UserName};

/// Requested ordering of a history response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryOrder {
    /// Oldest first; the shape the route predictor consumes.
    Ascending,
    /// Most recent first.
    #[default]
    Descending,
}

/// Error returned when an `order` value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order must be one of asc, ascending, desc, descending (got {0:?})")]
pub struct HistoryOrderParseError(String);

impl FromStr for HistoryOrder {
    type Err = HistoryOrderParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(HistoryOrderParseError(raw.to_owned())),
        }
    }
}

/// Sort `points` by parsed timestamp and keep at most `limit` of them.
///
/// Points whose timestamp cannot be parsed count as the earliest.
///
/// # Examples
/// ```
/// use geotracker::domain::{HistoryOrder, LocationPoint, order_points};
///
/// let points = vec![
///     LocationPoint::new(0.0, 0.0, "2024-01-01T00:00:00Z", "d", "u"),
///     LocationPoint::new(2.0, 2.0, "2024-01-01T00:02:00Z", "d", "u"),
///     LocationPoint::new(1.0, 1.0, "2024-01-01T00:01:00Z", "d", "u"),
/// ];
/// let latest = order_points(points, HistoryOrder::Descending, Some(1));
/// assert_eq!(latest.len(), 1);
/// assert_eq!(latest[0].latitude(), 2.0);
/// ```
pub fn order_points(
    mut points: Vec<LocationPoint>,
    order: HistoryOrder,
    limit: Option<usize>,
) -> Vec<LocationPoint> {
    match order {
        HistoryOrder::Ascending => points.sort_by_cached_key(LocationPoint::instant),
        HistoryOrder::Descending => points.sort_by_cached_key(|point| Reverse(point.instant())),
    }
    if let Some(limit) = limit {
        points.truncate(limit);
    }
    points
}

fn map_store_error(error: LocationStoreError) -> Error {
    Error::dependency_unavailable("failed to load location history", error)
}

pub(crate) fn parse_user_name(raw: String) -> Result<UserName, Error> {
    UserName::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "userName",
            "code": "missing_field",
        }))
    })
}

/// History selector backed by a [`LocationStore`].
///
/// # Examples
/// ```rust,no_run
/// # async fn example() -> Result<(), geotracker::domain::Error> {
/// use std::sync::Arc;
///
/// use geotracker::domain::ports::FixtureLocationStore;
/// use geotracker::domain::{HistoryOrder, LocationHistoryService, UserName};
///
/// let service = LocationHistoryService::new(Arc::new(FixtureLocationStore));
/// let user = UserName::new("ana").expect("valid user");
/// let points = service.select(&user, Some(5), HistoryOrder::Ascending).await?;
/// assert!(points.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct LocationHistoryService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for LocationHistoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ?Sized> LocationHistoryService<S> {
    /// Create a selector reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> LocationHistoryService<S>
where
    S: LocationStore + ?Sized,
{
    /// Run the fetch → sort → truncate pipeline for an already validated user.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::DependencyUnavailable`] when the
    /// store query fails; a failed query never degrades to an empty history.
    pub async fn select(
        &self,
        user_name: &UserName,
        limit: Option<usize>,
        order: HistoryOrder,
    ) -> Result<Vec<LocationPoint>, Error> {
        let points = self.store.find_by_user(user_name).await.map_err(|err| {
            warn!(user_name = %user_name, error = %err, "location store query failed");
            map_store_error(err)
        })?;

        let fetched = points.len();
        let untimed = points.iter().filter(|point| point.instant().is_none()).count();
        if untimed > 0 {
            warn!(user_name = %user_name, untimed, "history contains unparseable timestamps");
        }

        let selected = order_points(points, order, limit);
        debug!(
            user_name = %user_name,
            fetched,
            returned = selected.len(),
            ?order,
            "location history selected"
        );
        Ok(selected)
    }
}

#[async_trait]
impl<S> LocationHistoryQuery for LocationHistoryService<S>
where
    S: LocationStore + ?Sized,
{
    async fn select_history(&self, request: HistoryRequest) -> Result<Vec<LocationPoint>, Error> {
        let user_name = parse_user_name(request.user_name)?;
        self.select(&user_name, request.limit, request.order).await
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
