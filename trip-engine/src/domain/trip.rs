//! Route results and the trips built from them.

use std::time::Duration;

use tracing::warn;

use super::{Place, PlaceId};

/// Driving estimate for one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarRouteResult {
    pub place_id: PlaceId,
    /// Ceiling of the backend's fractional seconds.
    pub duration_seconds: u64,
    /// Ceiling of the backend's fractional meters.
    pub distance_meters: u64,
    pub cost_cents: u64,
}

/// Transit estimate for one place.
///
/// `cost_cents` is the driving cost for the same place; transit fares are
/// not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRouteResult {
    pub place_id: PlaceId,
    pub duration_seconds: u64,
    pub cost_cents: u64,
}

/// Estimated time and cost to reach a saved place.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub place: Place,
    pub time: Duration,
    /// Cost in cents, saturated to the 16-bit range.
    pub cost: u16,
}

impl Trip {
    /// Build a trip, saturating `cost_cents` at `u16::MAX`.
    pub fn new(place: Place, duration_seconds: u64, cost_cents: u64) -> Self {
        let cost = u16::try_from(cost_cents).unwrap_or_else(|_| {
            warn!(
                place = %place.id,
                cost_cents,
                "Trip cost exceeds 16-bit range, saturating"
            );
            u16::MAX
        });

        Self {
            place,
            time: Duration::from_secs(duration_seconds),
            cost,
        }
    }
}
