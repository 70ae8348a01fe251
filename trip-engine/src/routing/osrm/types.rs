//! OSRM Table API response types.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service>

use serde::Deserialize;

use crate::error::{Provider, TripError};
use crate::routing::DrivingLeg;

/// OSRM Table API response.
///
/// `code` is `"Ok"` on success; otherwise `message` explains the failure.
/// Matrix cells are `None` when no route exists between a pair.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    pub code: String,

    #[serde(default)]
    pub message: Option<String>,

    /// Durations in seconds.
    #[serde(default)]
    pub durations: Option<Vec<Vec<Option<f64>>>>,

    /// Distances in meters.
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Extract the origin's legs to `destinations` targets.
    ///
    /// Fails on a non-`Ok` code, missing matrices, wrong row width, or an
    /// unreachable destination.
    pub fn into_legs(self, destinations: usize) -> Result<Vec<DrivingLeg>, TripError> {
        if !self.is_ok() {
            return Err(TripError::upstream(
                Provider::Car,
                format!(
                    "OSRM returned {}: {}",
                    self.code,
                    self.message.unwrap_or_default()
                ),
            ));
        }

        let durations = origin_row(self.durations, "durations", destinations)?;
        let distances = origin_row(self.distances, "distances", destinations)?;

        durations
            .into_iter()
            .zip(distances)
            .enumerate()
            .map(|(idx, cells)| match cells {
                (Some(duration_seconds), Some(distance_meters)) => Ok(DrivingLeg {
                    duration_seconds,
                    distance_meters,
                }),
                _ => Err(TripError::malformed(
                    Provider::Car,
                    format!("no driving route to destination {idx}"),
                )),
            })
            .collect()
    }
}

/// First row of a matrix, without the origin-to-origin cell.
fn origin_row(
    matrix: Option<Vec<Vec<Option<f64>>>>,
    name: &str,
    destinations: usize,
) -> Result<Vec<Option<f64>>, TripError> {
    let mut row = matrix
        .and_then(|rows| rows.into_iter().next())
        .ok_or_else(|| TripError::malformed(Provider::Car, format!("OSRM response missing {name}")))?;

    if row.len() != destinations + 1 {
        return Err(TripError::malformed(
            Provider::Car,
            format!(
                "OSRM {name} row has {} cells, expected {}",
                row.len(),
                destinations + 1
            ),
        ));
    }

    row.remove(0);
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> TableResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_origin_row() {
        let response = parse(
            r#"{
                "code": "Ok",
                "durations": [[0.0, 120.5, 300.0]],
                "distances": [[0.0, 1500.2, 4000.0]]
            }"#,
        );

        let legs = response.into_legs(2).unwrap();

        assert_eq!(
            legs,
            vec![
                DrivingLeg {
                    duration_seconds: 120.5,
                    distance_meters: 1500.2
                },
                DrivingLeg {
                    duration_seconds: 300.0,
                    distance_meters: 4000.0
                },
            ]
        );
    }

    #[test]
    fn error_code_is_upstream_failure() {
        let response = parse(r#"{"code": "NoTable", "message": "Too many coordinates"}"#);

        let err = response.into_legs(1).unwrap_err();

        assert_eq!(
            err,
            TripError::upstream(Provider::Car, "OSRM returned NoTable: Too many coordinates")
        );
    }

    #[test]
    fn missing_distances_is_malformed() {
        let response = parse(r#"{"code": "Ok", "durations": [[0.0, 10.0]]}"#);

        let err = response.into_legs(1).unwrap_err();

        assert!(matches!(err, TripError::MalformedUpstreamResponse { .. }));
        assert!(err.to_string().contains("distances"));
    }

    #[test]
    fn wrong_width_is_malformed() {
        let response = parse(
            r#"{"code": "Ok", "durations": [[0.0, 10.0]], "distances": [[0.0, 100.0]]}"#,
        );

        let err = response.into_legs(2).unwrap_err();

        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn unreachable_destination_is_malformed() {
        let response = parse(
            r#"{"code": "Ok", "durations": [[0.0, null]], "distances": [[0.0, null]]}"#,
        );

        let err = response.into_legs(1).unwrap_err();

        assert!(matches!(err, TripError::MalformedUpstreamResponse { .. }));
    }
}
