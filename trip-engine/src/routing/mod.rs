//! Route providers and the backends they call.
//!
//! The orchestrator sees two contracts, [`CarRoutes`] and [`TrainRoutes`].
//! Each is implemented by one concrete provider that batches its places
//! against an external backend:
//!
//! - [`CarRouteProvider`] sends one driving matrix request for the whole
//!   batch and prices each result through the cost policy.
//! - [`TrainRouteProvider`] queries the transit router once per place,
//!   reduces the candidate itineraries to a representative duration, and
//!   borrows car pricing since transit fares are not modelled.
//!
//! Backends are behind [`DrivingBackend`] and [`TransitBackend`]; the HTTP
//! implementations speak the OSRM Table API and the MOTIS plan API.

mod aggregate;
mod car;
pub mod motis;
pub mod osrm;
mod train;

#[doc(hidden)]
pub mod mock;

use std::future::Future;

use crate::domain::{CarRouteResult, Coordinate, Place, TrainRouteResult};
use crate::error::{Provider, TripError};

pub use aggregate::{representative_duration, trimmed_average};
pub use car::CarRouteProvider;
pub use train::TrainRouteProvider;

/// Contract for estimating driving trips.
pub trait CarRoutes {
    /// One result per place, in input order. Empty input yields an empty
    /// result without touching the network.
    fn calculate_routes(
        &self,
        places: &[Place],
        origin: Coordinate,
    ) -> impl Future<Output = Result<Vec<CarRouteResult>, TripError>> + Send;
}

/// Contract for estimating transit trips.
pub trait TrainRoutes {
    /// One result per place, in input order. Empty input yields an empty
    /// result without touching the network.
    fn calculate_routes(
        &self,
        places: &[Place],
        origin: Coordinate,
    ) -> impl Future<Output = Result<Vec<TrainRouteResult>, TripError>> + Send;
}

/// Raw driving estimate for one destination, as reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivingLeg {
    pub duration_seconds: f64,
    pub distance_meters: f64,
}

/// Trait for driving distance/time matrix services.
pub trait DrivingBackend {
    /// Legs from `origin` to each destination, in destination order.
    fn driving_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> impl Future<Output = Result<Vec<DrivingLeg>, TripError>> + Send;
}

/// Candidate durations (seconds) returned by a transit router.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitCandidates {
    /// Routed public-transport itineraries.
    pub itineraries: Vec<f64>,
    /// Non-transit alternatives such as walking the whole way.
    pub direct: Vec<f64>,
}

/// Trait for transit routing services.
pub trait TransitBackend {
    /// Candidate durations from `origin` to `destination`.
    fn plan(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<TransitCandidates, TripError>> + Send;
}

/// Round a backend quantity up to whole units.
///
/// Negative, NaN and infinite values are malformed.
pub(crate) fn whole_units(provider: Provider, what: &str, value: f64) -> Result<u64, TripError> {
    if !value.is_finite() || value < 0.0 {
        return Err(TripError::malformed(
            provider,
            format!("{what} must be a finite non-negative number, got {value}"),
        ));
    }
    // Saturating cast; realistic trip values are far below u64::MAX.
    Ok(value.ceil() as u64)
}

/// First 500 characters of a response body, for error messages.
pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(500).collect()
}
