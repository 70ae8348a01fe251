//! Mock backends for testing without network access.
//!
//! Responses are registered per destination coordinate up front and served
//! as if they came from a live router. Every call is counted so tests can
//! assert on short-circuiting.

use std::sync::Mutex;

use crate::domain::Coordinate;
use crate::error::{Provider, TripError};

use super::{DrivingBackend, DrivingLeg, TransitBackend, TransitCandidates};

/// Driving backend answering from a fixed table of legs.
#[derive(Debug, Default)]
pub struct StaticDrivingBackend {
    legs: Vec<(Coordinate, DrivingLeg)>,
    failure: Option<TripError>,
    calls: Mutex<usize>,
}

impl StaticDrivingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose every call fails with `error`.
    pub fn failing(error: TripError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Register the leg returned for `destination`.
    pub fn with_leg(mut self, destination: Coordinate, leg: DrivingLeg) -> Self {
        self.legs.push((destination, leg));
        self
    }

    /// Number of matrix requests served.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DrivingBackend for StaticDrivingBackend {
    async fn driving_matrix(
        &self,
        _origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<DrivingLeg>, TripError> {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        destinations
            .iter()
            .map(|dest| {
                self.legs
                    .iter()
                    .find(|(c, _)| c == dest)
                    .map(|(_, leg)| *leg)
                    .ok_or_else(|| TripError::malformed(Provider::Car, format!("no route to {dest}")))
            })
            .collect()
    }
}

/// Transit backend answering from a fixed table of candidates.
#[derive(Debug, Default)]
pub struct StaticTransitBackend {
    plans: Vec<(Coordinate, Result<TransitCandidates, TripError>)>,
    calls: Mutex<usize>,
}

impl StaticTransitBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the candidates returned for `destination`.
    pub fn with_candidates(mut self, destination: Coordinate, candidates: TransitCandidates) -> Self {
        self.plans.push((destination, Ok(candidates)));
        self
    }

    /// Make queries to `destination` fail with `error`.
    pub fn with_failure(mut self, destination: Coordinate, error: TripError) -> Self {
        self.plans.push((destination, Err(error)));
        self
    }

    /// Number of plan requests served.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TransitBackend for StaticTransitBackend {
    async fn plan(
        &self,
        _origin: Coordinate,
        destination: Coordinate,
    ) -> Result<TransitCandidates, TripError> {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;

        self.plans
            .iter()
            .find(|(c, _)| *c == destination)
            .map(|(_, plan)| plan.clone())
            .unwrap_or_else(|| {
                Err(TripError::malformed(
                    Provider::Train,
                    format!("no plan to {destination}"),
                ))
            })
    }
}
