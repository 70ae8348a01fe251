//! Cost calculation policy.

use tracing::debug;

use crate::domain::UserId;
use crate::error::TripError;
use crate::sources::SettingsSource;

use super::cache::SettingsCache;
use super::config::PricingConfig;

const SECONDS_PER_HOUR: u128 = 3600;
const METERS_PER_KILOMETER: u128 = 1000;

/// `ceil(numerator * rate / denominator)` without float error.
fn ceil_scaled(numerator: u64, rate: u32, denominator: u128) -> u64 {
    let scaled = u128::from(numerator) * u128::from(rate);
    u64::try_from(scaled.div_ceil(denominator)).unwrap_or(u64::MAX)
}

/// Time-based cost: `ceil(duration_seconds / 3600 * cents_per_hour)`.
pub fn time_cost(duration_seconds: u64, cents_per_hour: u32) -> u64 {
    ceil_scaled(duration_seconds, cents_per_hour, SECONDS_PER_HOUR)
}

/// Distance-based cost: `ceil(distance_meters / 1000 * cents_per_kilometer)`.
pub fn distance_cost(distance_meters: u64, cents_per_kilometer: u32) -> u64 {
    ceil_scaled(distance_meters, cents_per_kilometer, METERS_PER_KILOMETER)
}

/// Prices trips for one aggregation request.
///
/// Resolution order for a user:
/// 1. the user's hourly rate, if set;
/// 2. the user's distance rate, if set;
/// 3. the default pseudo-user's distance rate, if set;
/// 4. the configured fallback distance rate.
///
/// Settings lookups are memoized for the lifetime of the policy, so a
/// policy must not outlive the request that created it.
pub struct CostPolicy<'a, S> {
    settings: SettingsCache<'a, S>,
    fallback_cents_per_kilometer: u32,
}

impl<'a, S: SettingsSource> CostPolicy<'a, S> {
    /// Create a policy with a fresh settings cache.
    pub fn new(source: &'a S, config: &PricingConfig) -> Self {
        Self {
            settings: SettingsCache::new(source),
            fallback_cents_per_kilometer: config.fallback_cents_per_kilometer,
        }
    }

    /// Cost in cents of a trip of the given distance and duration for `user`.
    ///
    /// The default-settings sentinel is not a valid user here.
    pub async fn calculate_cost(
        &self,
        user: UserId,
        distance_meters: u64,
        duration_seconds: u64,
    ) -> Result<u64, TripError> {
        if user.is_default() {
            return Err(TripError::InvalidInput(
                "the default-settings id cannot be priced as a user".to_string(),
            ));
        }

        let own = self.settings.get(user).await?;

        if let Some(cents_per_hour) = own.as_ref().and_then(|s| s.cents_per_hour) {
            return Ok(time_cost(duration_seconds, cents_per_hour));
        }

        let cents_per_kilometer = match own.as_ref().and_then(|s| s.cents_per_kilometer) {
            Some(rate) => rate,
            None => self.default_cents_per_kilometer().await?,
        };

        Ok(distance_cost(distance_meters, cents_per_kilometer))
    }

    /// Fleet-wide distance rate, or the fallback constant.
    async fn default_cents_per_kilometer(&self) -> Result<u32, TripError> {
        let defaults = self.settings.get(UserId::DEFAULT).await?;
        let rate = defaults.as_ref().and_then(|s| s.cents_per_kilometer);

        if rate.is_none() {
            debug!(
                fallback = self.fallback_cents_per_kilometer,
                "No default distance rate configured, using fallback"
            );
        }

        Ok(rate.unwrap_or(self.fallback_cents_per_kilometer))
    }
}
