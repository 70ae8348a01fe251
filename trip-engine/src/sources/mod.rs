//! Collaborators that supply places and pricing settings.
//!
//! Persistence lives outside the engine; these traits are the narrow
//! interfaces it consumes. In-memory implementations back tests and the
//! command-line binary.

mod memory;

use std::future::Future;

use crate::domain::{Place, UserId, UserSettings};
use crate::error::TripError;

pub use memory::{InMemoryPlaces, InMemorySettings};

/// Which places to estimate trips for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceScope {
    /// Places owned by one user.
    User(UserId),
    /// Every saved place.
    All,
}

/// Trait for loading saved places.
pub trait PlaceSource {
    /// List places in `scope`, in a stable order.
    fn list_places(
        &self,
        scope: PlaceScope,
    ) -> impl Future<Output = Result<Vec<Place>, TripError>> + Send;
}

/// Trait for loading per-user pricing settings.
pub trait SettingsSource {
    /// Get settings for `user`, or `None` if none were ever stored.
    ///
    /// Called with [`UserId::DEFAULT`] to read the fleet-wide default.
    fn get_settings(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Option<UserSettings>, TripError>> + Send;
}
