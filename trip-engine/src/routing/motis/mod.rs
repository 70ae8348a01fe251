//! MOTIS transit routing client.
//!
//! Each destination is planned separately:
//!
//! ```text
//! GET {base}/api/v1/plan?fromPlace={lat},{lon}&toPlace={lat},{lon}&time={rfc3339}
//! ```
//!
//! The response carries routed `itineraries` and non-transit `direct`
//! connections, each with a `duration` in seconds.

mod client;
mod types;

pub use client::{MotisClient, MotisConfig};
pub use types::{PlanItinerary, PlanResponse};
