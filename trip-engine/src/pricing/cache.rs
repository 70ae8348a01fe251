//! Per-request memoization of user settings.
//!
//! One cache lives for exactly one aggregation. Concurrent lookups for the
//! same user share a single call to the settings source; failed lookups are
//! not cached.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{UserId, UserSettings};
use crate::error::TripError;
use crate::sources::SettingsSource;

/// Settings cache wrapping a [`SettingsSource`].
pub struct SettingsCache<'a, S> {
    source: &'a S,
    entries: MokaCache<UserId, Option<Arc<UserSettings>>>,
}

impl<'a, S: SettingsSource> SettingsCache<'a, S> {
    /// Create an empty cache.
    ///
    /// The cache is unbounded: it lives for one request, and evicting a
    /// user mid-request could price them twice with different rates.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            entries: MokaCache::builder().build(),
        }
    }

    /// Get settings for `user`, consulting the source at most once.
    pub async fn get(&self, user: UserId) -> Result<Option<Arc<UserSettings>>, TripError> {
        self.entries
            .try_get_with(user, async {
                trace!(%user, "Loading user settings");
                let settings = self.source.get_settings(user).await?;
                Ok::<_, TripError>(settings.map(Arc::new))
            })
            .await
            .map_err(|e: Arc<TripError>| (*e).clone())
    }
}
