//! Transit route provider.

use futures::future::try_join_all;
use tracing::{debug, trace};

use crate::domain::{Coordinate, Place, TrainRouteResult};
use crate::error::{Provider, TripError};

use super::aggregate::representative_duration;
use super::{CarRoutes, TrainRoutes, TransitBackend, TransitCandidates};

/// Estimates transit trips, one router query per place.
///
/// Transit fares are not modelled: each place is priced as if driven, via
/// the wrapped car provider.
pub struct TrainRouteProvider<'a, T, C> {
    transit: &'a T,
    pricing: &'a C,
}

impl<'a, T, C> TrainRouteProvider<'a, T, C> {
    pub fn new(transit: &'a T, pricing: &'a C) -> Self {
        Self { transit, pricing }
    }
}

impl<T, C> TrainRouteProvider<'_, T, C>
where
    T: TransitBackend + Sync,
{
    /// Representative duration for every place, in input order.
    async fn durations(&self, places: &[Place], origin: Coordinate) -> Result<Vec<u64>, TripError> {
        let queries = places.iter().map(|place| async move {
            let candidates = self.transit.plan(origin, place.location).await?;
            trace!(
                place = %place.id,
                itineraries = candidates.itineraries.len(),
                direct = candidates.direct.len(),
                "Transit candidates received"
            );

            check_candidates(place, &candidates)?;

            representative_duration(&candidates).ok_or_else(|| {
                TripError::malformed(
                    Provider::Train,
                    format!("no itineraries or direct connections to place {}", place.id),
                )
            })
        });

        try_join_all(queries).await
    }
}

/// Every candidate duration must be a finite, non-negative number of seconds.
fn check_candidates(place: &Place, candidates: &TransitCandidates) -> Result<(), TripError> {
    let invalid = candidates
        .itineraries
        .iter()
        .chain(&candidates.direct)
        .find(|d| !d.is_finite() || **d < 0.0);

    match invalid {
        Some(duration) => Err(TripError::malformed(
            Provider::Train,
            format!("candidate duration {duration} to place {} is invalid", place.id),
        )),
        None => Ok(()),
    }
}

impl<T, C> TrainRoutes for TrainRouteProvider<'_, T, C>
where
    T: TransitBackend + Sync,
    C: CarRoutes + Sync,
{
    async fn calculate_routes(
        &self,
        places: &[Place],
        origin: Coordinate,
    ) -> Result<Vec<TrainRouteResult>, TripError> {
        if places.is_empty() {
            return Ok(Vec::new());
        }

        let (durations, car_prices) = tokio::try_join!(
            self.durations(places, origin),
            self.pricing.calculate_routes(places, origin),
        )?;

        if car_prices.len() != places.len() {
            return Err(TripError::malformed(
                Provider::Car,
                format!(
                    "expected {} car prices, got {}",
                    places.len(),
                    car_prices.len()
                ),
            ));
        }

        let results = places
            .iter()
            .zip(durations)
            .zip(car_prices)
            .map(|((place, duration_seconds), car)| {
                if car.place_id != place.id {
                    return Err(TripError::malformed(
                        Provider::Car,
                        format!("car price for {} returned for {}", car.place_id, place.id),
                    ));
                }
                Ok(TrainRouteResult {
                    place_id: place.id.clone(),
                    duration_seconds,
                    cost_cents: car.cost_cents,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(places = results.len(), %origin, "Train routes calculated");

        Ok(results)
    }
}
