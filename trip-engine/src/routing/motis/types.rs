//! MOTIS plan API response types.
//!
//! Only durations are read; the rest of each itinerary is ignored.

use serde::Deserialize;

use crate::error::{Provider, TripError};
use crate::routing::TransitCandidates;

/// Response of `/api/v1/plan`.
#[derive(Debug, Deserialize)]
pub struct PlanResponse {
    #[serde(default)]
    pub itineraries: Vec<PlanItinerary>,

    #[serde(default)]
    pub direct: Vec<PlanItinerary>,
}

/// One candidate connection.
#[derive(Debug, Deserialize)]
pub struct PlanItinerary {
    /// Door-to-door duration in seconds.
    pub duration: f64,
}

impl PlanResponse {
    /// Candidate durations, rejecting negative or non-finite values.
    pub fn into_candidates(self) -> Result<TransitCandidates, TripError> {
        Ok(TransitCandidates {
            itineraries: durations(self.itineraries, "itinerary")?,
            direct: durations(self.direct, "direct")?,
        })
    }
}

fn durations(items: Vec<PlanItinerary>, group: &str) -> Result<Vec<f64>, TripError> {
    items
        .into_iter()
        .map(|item| {
            if item.duration.is_finite() && item.duration >= 0.0 {
                Ok(item.duration)
            } else {
                Err(TripError::malformed(
                    Provider::Train,
                    format!("{group} duration {} is invalid", item.duration),
                ))
            }
        })
        .collect()
}
