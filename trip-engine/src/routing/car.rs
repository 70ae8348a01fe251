//! Driving route provider.

use futures::future::try_join_all;
use tracing::debug;

use crate::domain::{CarRouteResult, Coordinate, Place};
use crate::error::{Provider, TripError};
use crate::pricing::CostPolicy;
use crate::sources::SettingsSource;

use super::{CarRoutes, DrivingBackend, whole_units};

/// Estimates driving trips with one matrix request per batch.
pub struct CarRouteProvider<'a, B, S> {
    backend: &'a B,
    pricing: &'a CostPolicy<'a, S>,
}

impl<'a, B, S> CarRouteProvider<'a, B, S> {
    pub fn new(backend: &'a B, pricing: &'a CostPolicy<'a, S>) -> Self {
        Self { backend, pricing }
    }
}

impl<B, S> CarRoutes for CarRouteProvider<'_, B, S>
where
    B: DrivingBackend + Sync,
    S: SettingsSource + Sync,
{
    async fn calculate_routes(
        &self,
        places: &[Place],
        origin: Coordinate,
    ) -> Result<Vec<CarRouteResult>, TripError> {
        if places.is_empty() {
            return Ok(Vec::new());
        }

        let destinations: Vec<Coordinate> = places.iter().map(|p| p.location).collect();
        let legs = self.backend.driving_matrix(origin, &destinations).await?;

        if legs.len() != places.len() {
            return Err(TripError::malformed(
                Provider::Car,
                format!(
                    "expected {} driving legs, got {}",
                    places.len(),
                    legs.len()
                ),
            ));
        }

        let priced = places.iter().zip(legs).map(|(place, leg)| async move {
            let duration_seconds = whole_units(Provider::Car, "duration", leg.duration_seconds)?;
            let distance_meters = whole_units(Provider::Car, "distance", leg.distance_meters)?;
            let cost_cents = self
                .pricing
                .calculate_cost(place.owner, distance_meters, duration_seconds)
                .await?;

            Ok::<_, TripError>(CarRouteResult {
                place_id: place.id.clone(),
                duration_seconds,
                distance_meters,
                cost_cents,
            })
        });

        let results = try_join_all(priced).await?;
        debug!(places = results.len(), %origin, "Car routes calculated");

        Ok(results)
    }
}
