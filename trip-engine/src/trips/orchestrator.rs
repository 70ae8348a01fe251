//! Fan-out/fan-in of the two route providers.
//!
//! Places are split by transport mode, each non-empty batch goes to its
//! provider, and both providers run concurrently. The first failure drops
//! the other in-flight provider and fails the whole request.

use std::future::Future;
use std::time::Instant;

use tracing::{debug, info};

use crate::domain::{
    CarRouteResult, Coordinate, Place, PlaceId, TrainRouteResult, TransportMode, Trip,
};
use crate::error::{Provider, TripError};
use crate::routing::{CarRoutes, TrainRoutes};
use crate::sources::{PlaceScope, PlaceSource};

/// Coordinates place loading, provider fan-out and result merging.
pub struct TripOrchestrator<'a, P, C, T> {
    places: &'a P,
    car: &'a C,
    train: &'a T,
}

impl<'a, P, C, T> TripOrchestrator<'a, P, C, T>
where
    P: PlaceSource + Sync,
    C: CarRoutes + Sync,
    T: TrainRoutes + Sync,
{
    pub fn new(places: &'a P, car: &'a C, train: &'a T) -> Self {
        Self { places, car, train }
    }

    /// Trips from `origin` to every place in `scope`.
    pub async fn get_trips(
        &self,
        scope: PlaceScope,
        origin: Coordinate,
    ) -> Result<Vec<Trip>, TripError> {
        let places = self.places.list_places(scope).await?;
        self.trips_for(places, origin).await
    }

    /// Like [`get_trips`](Self::get_trips), but gives up with
    /// [`TripError::Cancelled`] as soon as `cancel` completes.
    pub async fn get_trips_until<F>(
        &self,
        scope: PlaceScope,
        origin: Coordinate,
        cancel: F,
    ) -> Result<Vec<Trip>, TripError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                debug!("Trip aggregation cancelled by caller");
                Err(TripError::Cancelled)
            }
            result = self.get_trips(scope, origin) => result,
        }
    }

    /// Trips from `origin` to `places`, in the same order as `places`.
    pub async fn trips_for(
        &self,
        places: Vec<Place>,
        origin: Coordinate,
    ) -> Result<Vec<Trip>, TripError> {
        if places.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();

        let mut car_places = Vec::new();
        let mut train_places = Vec::new();
        for place in &places {
            match place.mode {
                TransportMode::Car => car_places.push(place.clone()),
                TransportMode::Train => train_places.push(place.clone()),
            }
        }

        debug!(
            car = car_places.len(),
            train = train_places.len(),
            "Partitioned places by transport mode"
        );

        let (car_results, train_results) = tokio::try_join!(
            async {
                if car_places.is_empty() {
                    return Ok(Vec::new());
                }
                self.car.calculate_routes(&car_places, origin).await
            },
            async {
                if train_places.is_empty() {
                    return Ok(Vec::new());
                }
                self.train.calculate_routes(&train_places, origin).await
            },
        )?;

        let trips = merge(places, car_results, train_results)?;

        info!(
            trips = trips.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Trips calculated"
        );

        Ok(trips)
    }
}

/// Common view of the two provider result types.
trait RouteResult {
    fn place_id(&self) -> &PlaceId;
    fn duration_seconds(&self) -> u64;
    fn cost_cents(&self) -> u64;
}

impl RouteResult for CarRouteResult {
    fn place_id(&self) -> &PlaceId {
        &self.place_id
    }
    fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }
    fn cost_cents(&self) -> u64 {
        self.cost_cents
    }
}

impl RouteResult for TrainRouteResult {
    fn place_id(&self) -> &PlaceId {
        &self.place_id
    }
    fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }
    fn cost_cents(&self) -> u64 {
        self.cost_cents
    }
}

/// Re-interleave provider results into the original place order.
///
/// Each provider returns its batch in input order, so walking `places` and
/// pulling from the matching provider's results restores the original
/// order. Any id or count mismatch is a malformed response.
fn merge(
    places: Vec<Place>,
    car_results: Vec<CarRouteResult>,
    train_results: Vec<TrainRouteResult>,
) -> Result<Vec<Trip>, TripError> {
    let mut car = car_results.into_iter();
    let mut train = train_results.into_iter();
    let mut trips = Vec::with_capacity(places.len());

    for place in places {
        let (duration_seconds, cost_cents) = match place.mode {
            TransportMode::Car => estimate_for(&mut car, &place, Provider::Car)?,
            TransportMode::Train => estimate_for(&mut train, &place, Provider::Train)?,
        };
        trips.push(Trip::new(place, duration_seconds, cost_cents));
    }

    if car.next().is_some() {
        return Err(TripError::malformed(Provider::Car, "more results than places"));
    }
    if train.next().is_some() {
        return Err(TripError::malformed(Provider::Train, "more results than places"));
    }

    Ok(trips)
}

/// Duration and cost from the next result, which must belong to `place`.
fn estimate_for<R: RouteResult>(
    results: &mut impl Iterator<Item = R>,
    place: &Place,
    provider: Provider,
) -> Result<(u64, u64), TripError> {
    let result = results.next().ok_or_else(|| {
        TripError::malformed(provider, format!("no result for place {}", place.id))
    })?;

    if result.place_id() != &place.id {
        return Err(TripError::malformed(
            provider,
            format!(
                "result for place {} returned where {} was expected",
                result.place_id(),
                place.id
            ),
        ));
    }

    Ok((result.duration_seconds(), result.cost_cents()))
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
