//! In-process store and broker used when no external endpoints are configured.
//!
//! The broker appends every attributable report to the store it was built
//! with, standing in for the managed rule that copies topic messages into the
//! table. This keeps the service usable end to end on a laptop.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{
    LocationBroker, LocationBrokerError, LocationStore, LocationStoreError, PublishedLocation,
};
use crate::domain::{LocationPoint, UserName};

/// Vector-backed [`LocationStore`].
#[derive(Debug, Default)]
pub struct InMemoryLocationStore {
    points: Mutex<Vec<LocationPoint>>,
}

impl InMemoryLocationStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `points`.
    pub fn with_points(points: Vec<LocationPoint>) -> Self {
        Self {
            points: Mutex::new(points),
        }
    }

    /// Record a point.
    ///
    /// # Errors
    /// Fails only when a previous holder of the lock panicked.
    pub fn insert(&self, point: LocationPoint) -> Result<(), LocationStoreError> {
        self.lock()?.push(point);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<LocationPoint>>, LocationStoreError> {
        self.points
            .lock()
            .map_err(|_| LocationStoreError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn find_by_user(
        &self,
        user_name: &UserName,
    ) -> Result<Vec<LocationPoint>, LocationStoreError> {
        let points = self.lock()?;
        Ok(points
            .iter()
            .filter(|point| point.user_name() == user_name.as_str())
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
struct BrokerLog {
    published: Vec<(String, PublishedLocation)>,
    shadows: HashMap<String, Value>,
}

/// Recording [`LocationBroker`] that feeds an [`InMemoryLocationStore`].
#[derive(Debug)]
pub struct InMemoryLocationBroker {
    store: Arc<InMemoryLocationStore>,
    topic: String,
    thing_name: String,
    log: Mutex<BrokerLog>,
}

impl InMemoryLocationBroker {
    /// Broker publishing on `topic` and shadowing `thing_name`.
    pub fn new(
        store: Arc<InMemoryLocationStore>,
        topic: impl Into<String>,
        thing_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            topic: topic.into(),
            thing_name: thing_name.into(),
            log: Mutex::new(BrokerLog::default()),
        }
    }

    /// Reports published so far, paired with their topic.
    pub fn published(&self) -> Vec<(String, PublishedLocation)> {
        self.log
            .lock()
            .map(|log| log.published.clone())
            .unwrap_or_default()
    }

    /// Last shadow document written for `thing_name`.
    pub fn shadow(&self, thing_name: &str) -> Option<Value> {
        self.log
            .lock()
            .ok()
            .and_then(|log| log.shadows.get(thing_name).cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BrokerLog>, LocationBrokerError> {
        self.log
            .lock()
            .map_err(|_| LocationBrokerError::transport("in-memory broker lock poisoned"))
    }
}

#[async_trait]
impl LocationBroker for InMemoryLocationBroker {
    async fn publish(&self, report: &PublishedLocation) -> Result<(), LocationBrokerError> {
        self.lock()?
            .published
            .push((self.topic.clone(), report.clone()));
        if let Some(point) = report.to_point() {
            self.store
                .insert(point)
                .map_err(|err| LocationBrokerError::transport(err.to_string()))?;
        }
        Ok(())
    }

    async fn update_shadow(&self, report: &PublishedLocation) -> Result<(), LocationBrokerError> {
        self.lock()?
            .shadows
            .insert(self.thing_name.clone(), report.shadow_document());
        Ok(())
    }
}
