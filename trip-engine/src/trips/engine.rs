//! Long-lived entry point that wires collaborators per request.

use std::future::Future;

use tracing::{Instrument, info_span};

use crate::domain::{Coordinate, Trip};
use crate::error::TripError;
use crate::pricing::{CostPolicy, PricingConfig};
use crate::routing::{CarRouteProvider, DrivingBackend, TrainRouteProvider, TransitBackend};
use crate::sources::{PlaceScope, PlaceSource, SettingsSource};

use super::TripOrchestrator;

/// Trip aggregation over a place store, a settings store and two routing
/// backends.
///
/// Every call builds its own [`CostPolicy`], so settings are memoized for
/// exactly one request and never leak between requests.
pub struct TripEngine<P, S, B, T> {
    places: P,
    settings: S,
    driving: B,
    transit: T,
    pricing: PricingConfig,
}

impl<P, S, B, T> TripEngine<P, S, B, T>
where
    P: PlaceSource + Sync,
    S: SettingsSource + Sync,
    B: DrivingBackend + Sync,
    T: TransitBackend + Sync,
{
    pub fn new(places: P, settings: S, driving: B, transit: T, pricing: PricingConfig) -> Self {
        Self {
            places,
            settings,
            driving,
            transit,
            pricing,
        }
    }

    /// Trips from `origin` to every place in `scope`, in place order.
    pub async fn get_trips(
        &self,
        scope: PlaceScope,
        origin: Coordinate,
    ) -> Result<Vec<Trip>, TripError> {
        self.get_trips_until(scope, origin, std::future::pending::<()>())
            .await
    }

    /// Like [`get_trips`](Self::get_trips), but abandons all outstanding
    /// backend calls with [`TripError::Cancelled`] once `cancel` completes.
    pub async fn get_trips_until<F>(
        &self,
        scope: PlaceScope,
        origin: Coordinate,
        cancel: F,
    ) -> Result<Vec<Trip>, TripError>
    where
        F: Future<Output = ()>,
    {
        let span = info_span!("get_trips", ?scope, %origin);

        async {
            let policy = CostPolicy::new(&self.settings, &self.pricing);
            let car = CarRouteProvider::new(&self.driving, &policy);
            let train = TrainRouteProvider::new(&self.transit, &car);

            TripOrchestrator::new(&self.places, &car, &train)
                .get_trips_until(scope, origin, cancel)
                .await
        }
        .instrument(span)
        .await
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }
}
