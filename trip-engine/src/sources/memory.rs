//! In-memory place and settings stores.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Place, UserId, UserSettings};
use crate::error::TripError;

use super::{PlaceScope, PlaceSource, SettingsSource};

/// Thread-safe list of places, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlaces {
    inner: Arc<RwLock<Vec<Place>>>,
}

impl InMemoryPlaces {
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(places)),
        }
    }

    /// Parse a JSON array of places.
    ///
    /// Unknown transport modes and invalid coordinates are rejected.
    pub fn from_json(json: &str) -> Result<Self, TripError> {
        let places: Vec<Place> = serde_json::from_str(json)
            .map_err(|e| TripError::InvalidInput(format!("invalid places JSON: {e}")))?;
        Ok(Self::new(places))
    }

    /// Load a JSON array of places from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TripError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TripError::Source(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Append a place.
    pub async fn insert(&self, place: Place) {
        self.inner.write().await.push(place);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl PlaceSource for InMemoryPlaces {
    async fn list_places(&self, scope: PlaceScope) -> Result<Vec<Place>, TripError> {
        let guard = self.inner.read().await;
        let places = match scope {
            PlaceScope::All => guard.clone(),
            PlaceScope::User(user) => guard.iter().filter(|p| p.owner == user).cloned().collect(),
        };
        Ok(places)
    }
}

/// Thread-safe settings lookup keyed by user.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    inner: Arc<RwLock<HashMap<UserId, UserSettings>>>,
}

impl InMemorySettings {
    pub fn new(settings: impl IntoIterator<Item = UserSettings>) -> Self {
        let map = settings.into_iter().map(|s| (s.user_id, s)).collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Parse a JSON array of settings records.
    pub fn from_json(json: &str) -> Result<Self, TripError> {
        let settings: Vec<UserSettings> = serde_json::from_str(json)
            .map_err(|e| TripError::InvalidInput(format!("invalid settings JSON: {e}")))?;
        Ok(Self::new(settings))
    }

    /// Load a JSON array of settings records from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TripError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TripError::Source(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Store settings, replacing any previous entry for the same user.
    pub async fn upsert(&self, settings: UserSettings) {
        self.inner.write().await.insert(settings.user_id, settings);
    }
}

impl SettingsSource for InMemorySettings {
    async fn get_settings(&self, user: UserId) -> Result<Option<UserSettings>, TripError> {
        let guard = self.inner.read().await;
        Ok(guard.get(&user).cloned())
    }
}
