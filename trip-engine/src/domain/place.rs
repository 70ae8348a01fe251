//! Saved places and their transport modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Coordinate, UserId};

/// Opaque identifier of a saved place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported transport mode: {0:?}")]
pub struct InvalidTransportMode(String);

/// Which route provider estimates a place.
///
/// New places default to [`TransportMode::Car`].
///
/// # Examples
///
/// ```
/// use trip_engine::domain::TransportMode;
///
/// assert_eq!("Train".parse::<TransportMode>().unwrap(), TransportMode::Train);
/// assert!("boat".parse::<TransportMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Car,
    Train,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Train => "train",
        }
    }
}

impl FromStr for TransportMode {
    type Err = InvalidTransportMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("car") {
            Ok(TransportMode::Car)
        } else if s.eq_ignore_ascii_case("train") {
            Ok(TransportMode::Train)
        } else {
            Err(InvalidTransportMode(s.to_string()))
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A place saved by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub owner: UserId,
    pub name: String,
    pub location: Coordinate,
    #[serde(default)]
    pub mode: TransportMode,
}

impl Place {
    /// Create a new place.
    pub fn new(
        id: impl Into<String>,
        owner: UserId,
        name: impl Into<String>,
        location: Coordinate,
        mode: TransportMode,
    ) -> Self {
        Self {
            id: PlaceId::new(id),
            owner,
            name: name.into(),
            location,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_is_case_insensitive() {
        assert_eq!("car".parse::<TransportMode>().unwrap(), TransportMode::Car);
        assert_eq!("CAR".parse::<TransportMode>().unwrap(), TransportMode::Car);
        assert_eq!("tRaIn".parse::<TransportMode>().unwrap(), TransportMode::Train);
    }

    #[test]
    fn unknown_mode_rejected() {
        let err = "bicycle".parse::<TransportMode>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported transport mode: \"bicycle\"");
    }

    #[test]
    fn mode_defaults_to_car() {
        assert_eq!(TransportMode::default(), TransportMode::Car);
    }

    #[test]
    fn place_deserializes_with_default_mode() {
        let json = r#"{
            "id": "home",
            "owner": "6f1c2a9e-3b1d-4c55-9a0e-2d8f1b7c4e10",
            "name": "Home",
            "location": {"latitude": 51.5, "longitude": -0.12}
        }"#;

        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.id.as_str(), "home");
        assert_eq!(place.mode, TransportMode::Car);
    }

    #[test]
    fn place_rejects_unknown_mode() {
        let json = r#"{
            "id": "home",
            "owner": "6f1c2a9e-3b1d-4c55-9a0e-2d8f1b7c4e10",
            "name": "Home",
            "location": {"latitude": 51.5, "longitude": -0.12},
            "mode": "ferry"
        }"#;

        assert!(serde_json::from_str::<Place>(json).is_err());
    }
}
