//! Trip aggregation.
//!
//! [`TripOrchestrator`] does the fan-out/fan-in over any pair of route
//! providers. [`TripEngine`] owns the long-lived collaborators and wires a
//! fresh pricing policy and provider pair into an orchestrator for every
//! request.

mod engine;
mod orchestrator;

pub use engine::TripEngine;
pub use orchestrator::TripOrchestrator;
