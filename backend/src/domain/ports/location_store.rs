//! Driven port for reading recorded location points.
//!
//! The store is an external key-value service. It answers a single filtered
//! query per call and makes no ordering promise; callers sort.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{LocationPoint, UserName};

define_port_error! {
    /// Errors surfaced by location store adapters.
    pub enum LocationStoreError {
        /// The store could not be reached or timed out.
        Connection => "location store unreachable: {message}",
        /// The store answered with an error status.
        Query => "location store query failed: {message}",
        /// The store answered with a payload that could not be decoded.
        Decode => "location store returned an undecodable payload: {message}",
    }
}

/// Read access to the points recorded for a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Return every point whose `userName` equals `user_name`.
    ///
    /// The result is unordered and may be capped by the store's own limit.
    async fn find_by_user(
        &self,
        user_name: &UserName,
    ) -> Result<Vec<LocationPoint>, LocationStoreError>;
}

/// Store that never holds any points.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLocationStore;

#[async_trait]
impl LocationStore for FixtureLocationStore {
    async fn find_by_user(
        &self,
        _user_name: &UserName,
    ) -> Result<Vec<LocationPoint>, LocationStoreError> {
        Ok(Vec::new())
    }
}
