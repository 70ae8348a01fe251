//! Domain types for the trip engine.
//!
//! Places, users and the results produced by route providers. Values that
//! carry an invariant (coordinates, transport modes) enforce it at
//! construction time, so code receiving them can trust their validity.

mod coordinate;
mod place;
mod trip;
mod user;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use place::{InvalidTransportMode, Place, PlaceId, TransportMode};
pub use trip::{CarRouteResult, TrainRouteResult, Trip};
pub use user::{UserId, UserSettings};
