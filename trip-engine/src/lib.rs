//! Trip route and cost aggregation.
//!
//! Given an origin and a set of saved places, estimates how long it takes
//! to reach each place and what the trip costs. Driving places are routed
//! through an OSRM matrix in one batch; transit places are planned through
//! MOTIS one by one. Both batches run concurrently and are priced from
//! per-user settings.

pub mod config;
pub mod domain;
pub mod error;
pub mod pricing;
pub mod routing;
pub mod sources;
pub mod trips;

pub use config::{ConfigError, EngineConfig};
pub use error::{Provider, TripError};
pub use trips::{TripEngine, TripOrchestrator};
